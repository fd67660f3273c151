/// The output groupings, each serialized to its own document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    PackageManagers,
    Applications,
    IdeExtensions,
    BrowserExtensions,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::PackageManagers,
        Category::Applications,
        Category::IdeExtensions,
        Category::BrowserExtensions,
    ];

    /// The label used in document metadata and output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Category::PackageManagers => "package-managers",
            Category::Applications => "applications",
            Category::IdeExtensions => "ide-extensions",
            Category::BrowserExtensions => "browser-extensions",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_file_naming_convention() {
        assert_eq!(Category::PackageManagers.label(), "package-managers");
        assert_eq!(Category::Applications.label(), "applications");
        assert_eq!(Category::IdeExtensions.label(), "ide-extensions");
        assert_eq!(Category::BrowserExtensions.label(), "browser-extensions");
    }

    #[test]
    fn test_all_covers_every_category() {
        assert_eq!(Category::ALL.len(), 4);
    }
}

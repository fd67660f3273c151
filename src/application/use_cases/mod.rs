/// Use cases module containing application business logic orchestration
mod generate_sboms;

pub use generate_sboms::GenerateSbomsUseCase;

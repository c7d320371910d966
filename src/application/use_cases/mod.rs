pub mod clone_repositories;

pub use clone_repositories::{
    CloneRepositoriesConfig, CloneRepositoriesUseCase, CloneSummary, ClonedRepository,
    PlanOnlyCloner, RepositoryCloner,
};

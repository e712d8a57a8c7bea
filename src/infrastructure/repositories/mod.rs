pub mod interaction_repository;
pub mod pg_interaction_repository;
pub mod pg_product_repository;
pub mod product_repository;
pub mod rest_interaction_repository;
pub mod rest_product_repository;

pub use interaction_repository::InteractionRepository;
pub use pg_interaction_repository::PgInteractionRepository;
pub use pg_product_repository::PgProductRepository;
pub use product_repository::ProductRepository;
pub use rest_interaction_repository::RestInteractionRepository;
pub use rest_product_repository::RestProductRepository;

mod traits;

pub use traits::CatalogRepository;

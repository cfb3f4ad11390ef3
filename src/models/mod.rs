pub mod auth;
pub mod category;
pub mod image;
pub mod product;

pub use auth::{LoginRequest, LoginResponse, User};
pub use category::{Category, CategoryUpdate, NewCategory};
pub use image::{EntityType, ImageMetadata};
pub use product::{NewProduct, Product, ProductUpdate};

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity_log;
pub mod menu_item;
pub mod order;
pub mod order_item;
pub mod review;
pub mod system_counter;
pub mod user;
pub mod verification_code;

// Re-export specific types to avoid conflicts
pub use activity_log::{
    Column as ActivityLogColumn, Entity as ActivityLog, Model as ActivityLogModel,
};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use system_counter::{
    Column as SystemCounterColumn, Entity as SystemCounter, Model as SystemCounterModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use verification_code::{
    Column as VerificationCodeColumn, Entity as VerificationCode, Model as VerificationCodeModel,
};

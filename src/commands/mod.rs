pub mod add;
pub mod check;
pub mod edit;
pub mod init;
pub mod lineage;
pub mod link;
pub mod list;
pub mod rm;
pub mod show;
pub mod view;

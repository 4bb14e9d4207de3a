pub mod aggregate;
pub mod blob;
pub mod connection;
pub mod patcher_instance;
pub mod preset;
pub mod set;

pub use aggregate::SetAggregate;
pub use blob::Blob;
pub use connection::ConnectionRecord;
pub use patcher_instance::PatcherInstanceRecord;
pub use preset::PresetRecord;
pub use set::SetRecord;

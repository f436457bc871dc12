pub mod memory_repository;
pub mod rpc_repository;
pub mod traits;

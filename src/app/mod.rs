pub mod config;
pub mod errors;
pub mod init;
pub mod routes;

pub mod controllers;
pub mod dtos;
pub mod entities;
pub mod repository;
pub mod services;
pub mod utils;

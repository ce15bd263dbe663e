// apps/em_cli/src/commands/mod.rs

//! 命令实现模块

pub mod fetch;
pub mod info;
pub mod nearest;
pub mod search;
pub mod tiles;

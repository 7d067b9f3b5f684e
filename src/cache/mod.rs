//! Cache module for storing weekly menus to disk
//!
//! This module provides a cache manager that persists each restaurant's menu for a
//! week to the filesystem. Any read or parse failure is reported as a miss so a
//! damaged cache degrades to a re-fetch.

mod manager;

pub use manager::CacheManager;

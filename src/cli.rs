//! Command-line interface parsing for Bandeco
//!
//! This module handles parsing of CLI arguments using clap and turns them into the
//! startup configuration used by `main`.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::display::{DisplayOptions, MealFilter};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified meal is not recognized
    #[error("Invalid meal: '{0}'. Valid meals: l, lunch, d, dinner, a, all")]
    InvalidMeal(String),
}

/// Bandeco - Fetches USP's university restaurant menu for the day
#[derive(Parser, Debug)]
#[command(name = "bandeco")]
#[command(about = "Fetches USP's university restaurant menu for the day")]
#[command(version)]
pub struct Cli {
    /// Day to fetch the menu for. Can be a day of the week or a date.
    ///
    /// Examples: today, tomorrow, fri, friday, 16/10, 16/10/26, 16/10/2026
    #[arg(short, long, default_value = "today")]
    pub day: String,

    /// Meal of the day to fetch the menu for (l, lunch, d, dinner, a, all)
    #[arg(short, long, default_value = "all")]
    pub meal: String,

    /// Name of the restaurant to fetch the menu for
    #[arg(short, long, default_value = "each")]
    pub restaurant: String,

    /// Display the entire week's menu
    #[arg(short, long)]
    pub week: bool,

    /// Print verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON
    #[arg(short, long)]
    pub json: bool,

    /// Directory for cached menus (defaults to the user cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Raw day expression
    pub day: String,
    /// Raw restaurant search text
    pub restaurant: String,
    /// What to render
    pub display: DisplayOptions,
    /// Whether to render JSON instead of text
    pub json: bool,
    /// Whether diagnostics go to stderr
    pub verbose: bool,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
}

/// Parses a meal string argument into a MealFilter.
///
/// # Arguments
/// * `s` - The meal string from CLI
///
/// # Returns
/// * `Ok(MealFilter)` if the string matches a valid meal
/// * `Err(CliError::InvalidMeal)` if the string doesn't match
pub fn parse_meal_arg(s: &str) -> Result<MealFilter, CliError> {
    MealFilter::from_str(s).ok_or_else(|| CliError::InvalidMeal(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid meal was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let meal = parse_meal_arg(&cli.meal)?;
        Ok(StartupConfig {
            day: cli.day.clone(),
            restaurant: cli.restaurant.clone(),
            display: DisplayOptions {
                meal,
                week: cli.week,
            },
            json: cli.json,
            verbose: cli.verbose,
            cache_dir: cli.cache_dir.clone(),
        })
    }

    /// Default log filter directive for the verbosity level
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "bandeco=debug"
        } else {
            "bandeco=warn"
        }
    }
}

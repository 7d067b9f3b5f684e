//! USP restaurant menu client
//!
//! Fetches a restaurant's menu for the current week from USP's DWR endpoint and
//! extracts the per-day/per-meal records from the raw JavaScript-like response.

use regex::Regex;
use reqwest::Client;
use std::future::Future;
use std::sync::OnceLock;
use thiserror::Error;

use super::{Meal, MenuEntry, MenuEntrySet, RestaurantId};

/// DWR plain-call endpoint serving the menus
const USP_MENU_URL: &str = "https://uspdigital.usp.br/rucard/dwr/call/plaincall/CardapioControleDWR.obterCardapioRestUSP.dwr";

/// One record: menu text, date, meal code and calories, with anything in between
const RECORD_PATTERN: &str =
    r#"cdpdia:"(.+?)",.*?dtarfi:"(.+?)",.*?tiprfi:"(\w)",.*?vlrclorfi:(\d+)"#;

/// Errors that can occur when fetching or parsing menus
#[derive(Debug, Error)]
pub enum MenuError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A record carried a meal code other than lunch or dinner
    #[error("Unknown meal code: '{0}'")]
    UnknownMealCode(String),

    /// A record's calorie count is not a non-negative integer
    #[error("Malformed calorie value: '{0}'")]
    MalformedCalorieValue(String),
}

/// Source of raw menu responses for the current week
///
/// Implemented over HTTP by [`UspMenuClient`]; tests provide canned responses.
pub trait MenuSource {
    /// Fetches the raw response text for a restaurant
    fn fetch_raw(
        &self,
        restaurant: RestaurantId,
    ) -> impl Future<Output = Result<String, MenuError>> + Send;
}

/// Client for fetching menus from USP's restaurant service
#[derive(Debug, Clone)]
pub struct UspMenuClient {
    client: Client,
    url: String,
}

impl Default for UspMenuClient {
    fn default() -> Self {
        Self::new()
    }
}

impl UspMenuClient {
    /// Create a new UspMenuClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            url: USP_MENU_URL.to_string(),
        }
    }

    /// Create a new UspMenuClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            url: USP_MENU_URL.to_string(),
        }
    }

    /// Builds the DWR plain-call request body for a restaurant
    fn request_body(restaurant: RestaurantId) -> String {
        format!(
            "callCount=1\n\
             windowName=\n\
             nextReverseAjaxIndex=0\n\
             c0-scriptName=CardapioControleDWR\n\
             c0-methodName=obterCardapioRestUSP\n\
             c0-id=0\n\
             c0-param0=string:{}\n\
             batchId=1\n\
             instanceId=0\n\
             page=\n\
             scriptSessionId=1/2-34\n",
            restaurant
        )
    }
}

impl MenuSource for UspMenuClient {
    async fn fetch_raw(&self, restaurant: RestaurantId) -> Result<String, MenuError> {
        tracing::debug!(restaurant, "requesting menu over HTTP");
        let response = self
            .client
            .post(&self.url)
            .body(Self::request_body(restaurant))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

fn record_regex() -> &'static Regex {
    static RECORD: OnceLock<Regex> = OnceLock::new();
    RECORD.get_or_init(|| Regex::new(RECORD_PATTERN).expect("record pattern is valid"))
}

/// Extracts all menu records from a raw response
///
/// Records with an unknown meal code or a malformed calorie count are dropped with a
/// warning and parsing continues. A slot reported twice keeps the last record.
pub fn parse_menu(raw: &str) -> MenuEntrySet {
    let mut entries = MenuEntrySet::new();
    let mut records = 0;

    for captures in record_regex().captures_iter(raw) {
        records += 1;
        match sanitize_record(&captures[1], &captures[2], &captures[3], &captures[4]) {
            Ok((date, meal, entry)) => entries.insert(&date, meal, entry),
            Err(e) => tracing::warn!(error = %e, "dropping menu record"),
        }
    }

    tracing::debug!(records, entries = entries.len(), "response parsed");
    entries
}

/// Converts one raw record into `(date, meal, entry)`
fn sanitize_record(
    menu: &str,
    date: &str,
    meal_code: &str,
    calories: &str,
) -> Result<(String, Meal, MenuEntry), MenuError> {
    let meal =
        Meal::from_code(meal_code).ok_or_else(|| MenuError::UnknownMealCode(meal_code.to_string()))?;
    let calories: u64 = calories
        .parse()
        .map_err(|_| MenuError::MalformedCalorieValue(calories.to_string()))?;

    Ok((
        date.replace('\\', ""),
        meal,
        MenuEntry {
            menu: sanitize_menu_text(menu),
            calories,
        },
    ))
}

/// Cleans up the escaped menu text from the response
///
/// Unescapes `\/`, decodes backslash escapes (`\uXXXX`, `\n`, ...), turns `<br>`
/// into newlines and drops any backslash left over.
fn sanitize_menu_text(menu: &str) -> String {
    unescape(&menu.replace("\\/", "/"))
        .replace("<br>", "\n")
        .replace('\\', "")
}

/// Decodes backslash escape sequences
///
/// Unknown or incomplete sequences are kept as written.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => push_escaped(&mut out, &mut chars, '\n'),
            Some('t') => push_escaped(&mut out, &mut chars, '\t'),
            Some('r') => push_escaped(&mut out, &mut chars, '\r'),
            Some('"') => push_escaped(&mut out, &mut chars, '"'),
            Some('\'') => push_escaped(&mut out, &mut chars, '\''),
            Some('\\') => push_escaped(&mut out, &mut chars, '\\'),
            Some('u') => {
                chars.next();
                match read_code_unit(&mut chars) {
                    Some(high @ 0xD800..=0xDBFF) => {
                        // Surrogate pair: expect a `\uDC00..DFFF` right after.
                        let mut lookahead = chars.clone();
                        let low = match (lookahead.next(), lookahead.next()) {
                            (Some('\\'), Some('u')) => read_code_unit(&mut lookahead),
                            _ => None,
                        };
                        match low {
                            Some(low @ 0xDC00..=0xDFFF) => {
                                chars = lookahead;
                                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                            }
                            _ => out.push('\u{FFFD}'),
                        }
                    }
                    Some(code) => out.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                    None => out.push_str("\\u"),
                }
            }
            _ => out.push('\\'),
        }
    }

    out
}

fn push_escaped(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    decoded: char,
) {
    chars.next();
    out.push(decoded);
}

/// Reads exactly four hex digits, consuming them only on success
fn read_code_unit(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let digits: String = chars.clone().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    for _ in 0..4 {
        chars.next();
    }
    u32::from_str_radix(&digits, 16).ok()
}

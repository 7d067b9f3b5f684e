//! Menu rendering
//!
//! Formats a week's entries for a day or a whole week, either as colored text for
//! the terminal or as JSON.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::data::{restaurant_name, Meal, MenuEntry, MenuEntrySet, RestaurantId};
use crate::date::weekday_in_week_of;

const HEADING: &str = "\x1b[1;93m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[m";

/// Which meals to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealFilter {
    Lunch,
    Dinner,
    #[default]
    All,
}

impl MealFilter {
    /// Parses `l|lunch|d|dinner|a|all`, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" | "lunch" => Some(MealFilter::Lunch),
            "d" | "dinner" => Some(MealFilter::Dinner),
            "a" | "all" => Some(MealFilter::All),
            _ => None,
        }
    }

    pub fn includes(&self, meal: Meal) -> bool {
        match self {
            MealFilter::Lunch => meal == Meal::Lunch,
            MealFilter::Dinner => meal == Meal::Dinner,
            MealFilter::All => true,
        }
    }

    fn meals(&self) -> impl Iterator<Item = Meal> + '_ {
        [Meal::Lunch, Meal::Dinner]
            .into_iter()
            .filter(move |meal| self.includes(*meal))
    }
}

/// What to render
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    pub meal: MealFilter,
    /// Render Monday to Friday of the date's week instead of the single day
    pub week: bool,
}

/// Monday to Friday of the week containing `date`
pub fn week_days(date: NaiveDate) -> [NaiveDate; 5] {
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        .map(|weekday| weekday_in_week_of(weekday, date))
}

fn date_text(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn display_restaurant(restaurant: RestaurantId) -> &'static str {
    restaurant_name(restaurant).unwrap_or("UNKNOWN RESTAURANT")
}

/// Renders the menu as ANSI-colored text
pub fn render_pretty(
    entries: &MenuEntrySet,
    restaurant: RestaurantId,
    date: NaiveDate,
    options: DisplayOptions,
) -> String {
    let mut out = format!("{}# {}{}\n", HEADING, display_restaurant(restaurant), RESET);

    if options.week {
        for day in week_days(date) {
            out.push_str(&render_pretty_day(entries, day, options.meal));
        }
    } else {
        out.push_str(&render_pretty_day(entries, date, options.meal));
    }

    out
}

fn render_pretty_day(entries: &MenuEntrySet, date: NaiveDate, filter: MealFilter) -> String {
    let date_text = date_text(date);
    let mut out = format!("{}## {} ({}){}\n", HEADING, date.format("%A"), date_text, RESET);

    for meal in filter.meals() {
        out.push_str(&format!("{}### {}:{}\n", HEADING, meal.display_name(), RESET));
        match entries.get(&date_text, meal) {
            Some(entry) => {
                out.push_str(&entry.menu);
                out.push_str(&format!(
                    "\n\n{}Calories: {} Kcal{}\n",
                    BOLD, entry.calories, RESET
                ));
            }
            None => out.push_str("No menu available.\n"),
        }
    }

    out
}

/// One day in the JSON output
///
/// Meals not requested are omitted; requested meals with no entry are `null`.
#[derive(Debug, Serialize)]
struct DayMenu<'a> {
    date: String,
    weekday: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lunch: Option<Option<&'a MenuEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dinner: Option<Option<&'a MenuEntry>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MenuData<'a> {
    Day(DayMenu<'a>),
    Week(Vec<DayMenu<'a>>),
}

#[derive(Debug, Serialize)]
struct MenuDocument<'a> {
    restaurant: &'static str,
    data: MenuData<'a>,
}

fn day_menu(entries: &MenuEntrySet, date: NaiveDate, filter: MealFilter) -> DayMenu<'_> {
    let date_text = date_text(date);
    let slot = |meal| filter.includes(meal).then(|| entries.get(&date_text, meal));

    DayMenu {
        lunch: slot(Meal::Lunch),
        dinner: slot(Meal::Dinner),
        weekday: date.format("%A").to_string().to_lowercase(),
        date: date_text,
    }
}

/// Renders the menu as pretty-printed JSON
pub fn render_json(
    entries: &MenuEntrySet,
    restaurant: RestaurantId,
    date: NaiveDate,
    options: DisplayOptions,
) -> serde_json::Result<String> {
    let data = if options.week {
        MenuData::Week(
            week_days(date)
                .into_iter()
                .map(|day| day_menu(entries, day, options.meal))
                .collect(),
        )
    } else {
        MenuData::Day(day_menu(entries, date, options.meal))
    };

    serde_json::to_string_pretty(&MenuDocument {
        restaurant: display_restaurant(restaurant),
        data,
    })
}

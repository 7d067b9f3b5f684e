//! Static restaurant catalog for USP's university restaurants
//!
//! Restaurants are identified by their 1-based position in [`RESTAURANTS`], which is
//! also the identifier the remote menu service expects.

/// 1-based position of a restaurant in the catalog
pub type RestaurantId = u8;

/// Static array of all restaurant names, in the remote service's numbering order
pub static RESTAURANTS: [&str; 24] = [
    "PIRACICABA",
    "CENTRAL SAO CARLOS SC",
    "CAMPUS II SAO CARLOS SC",
    "CRHEA SAO CARLOS SC",
    "PIRASSUNUNGA",
    "CENTRAL",
    "PUSP-C SAO PAULO SP",
    "FISICA",
    "QUIMICA",
    "ADMINISTRACAO SAO PAULO SP",
    "FACULDADE SAUDE PUBLICA",
    "ESCOLA ENFERMAGEM",
    "EACH SAO PAULO SP",
    "FACULDADE DIREITO",
    "DPS CUASO SAO PAULO SP",
    "DPS EACH SAO PAULO SP",
    "EEL AREA I",
    "MEDICINA SAO PAULO SP",
    "RIBEIRAO PRETO",
    "BAURU",
    "PREFEITURA FERNANDO COSTA PIRASSUNUNGA",
    "WEB",
    "EEL AREA II",
    "REGISTRO ESTORNO",
];

/// Get all restaurant names in catalog order
pub fn all_restaurants() -> &'static [&'static str] {
    &RESTAURANTS
}

/// Get a restaurant name by its 1-based identifier
///
/// Returns `None` for `0` or identifiers past the end of the catalog.
pub fn restaurant_name(id: RestaurantId) -> Option<&'static str> {
    let index = usize::from(id).checked_sub(1)?;
    RESTAURANTS.get(index).copied()
}

/// Resolves free text to the identifier of the closest catalog entry
///
/// The input is upper-cased and scored against every name with [`similarity`]. The
/// highest score wins and ties go to the earliest entry. There is no minimum score,
/// so any input resolves to some restaurant.
pub fn resolve_restaurant(search: &str) -> RestaurantId {
    let search = search.to_uppercase();
    tracing::debug!(search = %search, "resolving restaurant");

    let mut best_index = 0;
    let mut best_ratio = f64::MIN;
    for (index, name) in RESTAURANTS.iter().enumerate() {
        let ratio = similarity(&search, name);
        tracing::trace!("{:40} {}", name, ratio);
        if ratio > best_ratio {
            best_index = index;
            best_ratio = ratio;
        }
    }

    // The catalog has fewer than 256 entries.
    (best_index + 1) as RestaurantId
}

/// Sequence similarity ratio in `[0, 1]`
///
/// Computed as `2 * M / T`, where `T` is the total number of characters in both strings
/// and `M` is the number of characters covered by matching blocks found by recursively
/// taking the longest common substring and repeating on the pieces to its left and right.
/// Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Counts characters covered by matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_characters(&a[..start_a], &b[..start_b])
        + matching_characters(&a[start_a + size..], &b[start_b + size..])
}

/// Longest common substring as `(start_a, start_b, size)`
///
/// Among equally long matches, the one starting earliest in `a` wins, then earliest in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // Length of the common suffix ending at a[i - 1], b[j - 1], for the previous row.
    let mut previous = vec![0usize; b.len() + 1];
    for i in 1..=a.len() {
        let mut current = vec![0usize; b.len() + 1];
        for j in 1..=b.len() {
            if a[i - 1] == b[j - 1] {
                current[j] = previous[j - 1] + 1;
                if current[j] > best.2 {
                    best = (i - current[j], j - current[j], current[j]);
                }
            }
        }
        previous = current;
    }
    best
}

// Search-query construction from vehicle scope and free text
use crate::model::VehicleInfo;
use crate::utils::trimmed_nonempty;

/// Builds one search string from the optional vehicle scope and free-text
/// term. Token order is fixed: year, make, model, free text; make and model
/// are lower-cased, the year is passed through as written.
///
/// Returns `None` when every input is absent or whitespace-only. No default
/// term is substituted; the caller must reject the request instead of
/// silently searching for something the user never asked for.
pub fn build_search_query(
    free_text: Option<&str>,
    vehicle: Option<&VehicleInfo>,
) -> Option<String> {
    let mut terms: Vec<String> = Vec::new();

    if let Some(vehicle) = vehicle {
        if let Some(year) = trimmed_nonempty(vehicle.year.as_deref()) {
            terms.push(year.to_string());
        }
        if let Some(make) = trimmed_nonempty(vehicle.make.as_deref()) {
            terms.push(make.to_lowercase());
        }
        if let Some(model) = trimmed_nonempty(vehicle.model.as_deref()) {
            terms.push(model.to_lowercase());
        }
    }

    if let Some(text) = trimmed_nonempty(free_text) {
        terms.push(text.to_string());
    }

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

/// Normalizes a crop name the way it is stored: trimmed and lower-cased.
/// Returns `None` for a blank name; there is no default crop.
pub fn normalize_crop_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Identifier used for cache entries and in-flight deduplication.
/// A region filter narrows the series, so it becomes part of the id.
pub fn cache_id(crop: &str, region: Option<&str>) -> Option<String> {
    let crop = normalize_crop_name(crop)?;
    match region.and_then(normalize_crop_name) {
        Some(region) => Some(format!("{}:{}", crop, region)),
        None => Some(crop),
    }
}

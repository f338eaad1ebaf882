pub fn cache_key(parts: &[&str]) -> String {
    // Separator keeps ("ab", "c") and ("a", "bc") apart.
    let combined = parts.join("\u{1f}");
    format!("{:x}", md5::compute(combined.as_bytes()))
}

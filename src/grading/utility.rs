/// Share of `part` in `total` as a percentage. Returns 0.0 when `total` is 0.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

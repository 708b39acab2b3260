/// Format elapsed seconds as "MM:SS".
///
/// Minutes are zero-padded to two digits but never capped, so a run of
/// 100 minutes or more renders as "100:00" and wider.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub const DOCVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SUFFIX: Option<&str> = option_env!("DOCVER_REVISION");

pub fn get_version() -> String {
    let suffix = GIT_SUFFIX.unwrap_or("dev");
    format!("{DOCVER_VERSION}-{suffix}")
}

/// Settings the conformance checker needs, regardless of where they come from.
pub trait ConfigProvider {
    fn api_base_url(&self) -> &str;
    fn enforce_origin(&self) -> bool;
}

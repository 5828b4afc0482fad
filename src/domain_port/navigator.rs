/// Location of the running console, the equivalent of `window.location`.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;
    fn replace(&self, route: &str);
}

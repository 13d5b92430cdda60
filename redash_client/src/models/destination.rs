json_entity!(
    /// An alert destination (Slack, e-mail, webhook, ...).
    Destination
);

impl Destination {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn kind(&self) -> Option<&str> {
        self.str_field("type")
    }
}

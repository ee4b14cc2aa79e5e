/// An aggregate call over row columns, as handed to the executor.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AggregateCall {
    pub func: String,            // normalized lowercase
    pub args: Vec<String>,       // column names read from each row
    pub alias: Option<String>,
}

impl AggregateCall {
    pub fn new(func: &str, args: &[&str]) -> Self {
        Self {
            func: func.to_ascii_lowercase(),
            args: args.iter().map(|a| a.to_string()).collect(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Output column name before de-duplication: the alias, else the function name.
    pub fn base_name(&self) -> String {
        self.alias.clone().unwrap_or_else(|| self.func.clone())
    }
}

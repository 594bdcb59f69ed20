#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Leave out the `Properties` entry of a node that has no properties.
    pub omit_empty_properties: bool,
}

//! Resources compiled into the binary from `config/resources/`.

pub const CONTRIBUTIONS_LIGHT: &str =
    include_str!("../../config/resources/contributions_light.json");
pub const CONTRIBUTIONS_DARK: &str = include_str!("../../config/resources/contributions_dark.json");

/// Embedded resource metadata.
#[derive(Debug, Clone)]
pub struct EmbeddedResource {
    pub name: &'static str,
    pub extension: &'static str,
    pub content: &'static str,
}

/// All embedded resources.
pub const RESOURCES: &[EmbeddedResource] = &[
    EmbeddedResource {
        name: "contributions_light",
        extension: "json",
        content: CONTRIBUTIONS_LIGHT,
    },
    EmbeddedResource {
        name: "contributions_dark",
        extension: "json",
        content: CONTRIBUTIONS_DARK,
    },
];

/// Look up an embedded resource.
pub fn get(name: &str, extension: &str) -> Option<&'static str> {
    RESOURCES
        .iter()
        .find(|r| r.name == name && r.extension == extension)
        .map(|r| r.content)
}

/// Names of embedded resources with `extension`.
pub fn names(extension: &str) -> impl Iterator<Item = &'static str> + '_ {
    RESOURCES
        .iter()
        .filter(move |r| r.extension == extension)
        .map(|r| r.name)
}

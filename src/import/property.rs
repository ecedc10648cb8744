//! Property flattening
//!
//! Applies vendor extensions (`label`, `creatable`, `updatable`,
//! `filterable`, `sortable`) onto a property's default capability flags.

use crate::models::{Extension, Property, RawProperty};

/// The closed set of extension names that affect a flattened property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionTag {
    Label,
    Creatable,
    Updatable,
    Filterable,
    Sortable,
}

impl ExtensionTag {
    /// Map an extension name to its tag; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "label" => Some(Self::Label),
            "creatable" => Some(Self::Creatable),
            "updatable" => Some(Self::Updatable),
            "filterable" => Some(Self::Filterable),
            "sortable" => Some(Self::Sortable),
            _ => None,
        }
    }

    /// Apply this tag's update to `property`.
    ///
    /// Flag tags are disabled whenever the value *contains* `false` anywhere,
    /// so `"somethingfalseish"` disables the flag as well.
    pub fn apply(self, property: &mut Property, value: &str) {
        let enabled = !value.contains("false");
        match self {
            Self::Label => property.label = value.to_string(),
            Self::Creatable => property.creatable = enabled,
            Self::Updatable => property.updatable = enabled,
            Self::Filterable => property.filterable = enabled,
            Self::Sortable => property.sortable = enabled,
        }
    }
}

/// Flatten a raw property into a [`Property`].
///
/// Extensions are applied in order, so the last one with a given name wins.
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::import::property::flatten_property;
/// use odata_explorer_sdk::models::{RawExtension, RawProperty};
///
/// let raw = RawProperty {
///     name: "CustomerID".to_string(),
///     type_name: "Edm.String".to_string(),
///     extensions: Some(vec![RawExtension {
///         name: "updatable".to_string(),
///         value: "false".to_string(),
///         namespace: None,
///     }]),
///     ..Default::default()
/// };
/// let property = flatten_property(&raw);
/// assert!(!property.updatable);
/// assert!(property.creatable);
/// ```
pub fn flatten_property(raw: &RawProperty) -> Property {
    let mut property = Property::new(raw.name.clone(), raw.type_name.clone());
    property.nullable = raw.nullable.clone();
    property.max_length = raw.max_length.clone();

    for extension in raw.extensions.iter().flatten() {
        if let Some(tag) = ExtensionTag::from_name(&extension.name) {
            tag.apply(&mut property, &extension.value);
        }
        property.extensions.push(Extension {
            name: extension.name.clone(),
            value: extension.value.clone(),
            namespace: extension.namespace.clone(),
        });
    }

    property
}

//! Association joining
//!
//! Resolves a navigation property's `relationship` to its association and
//! its roles to the concrete entity types at each association end.

use super::alias::local_name;
use crate::models::{Association, NavigationProperty};
use tracing::debug;

/// Which ends of a navigation property to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinSides {
    /// Only `to_type` (list/detail consumers)
    #[default]
    Target,
    /// Both `from_type` and `to_type` (graph consumers)
    Both,
}

/// Find the association a (possibly qualified) relationship name refers to.
///
/// The first association with a matching name wins.
pub fn find_association<'a>(
    relationship: &str,
    associations: &'a [Association],
) -> Option<&'a Association> {
    let name = local_name(relationship);
    associations.iter().find(|a| a.name == name)
}

/// Entity type at the end with `role`, alias-resolved.
///
/// The first end with a matching role wins when roles are duplicated.
pub fn find_end_type(association: &Association, role: &str) -> Option<String> {
    association
        .ends
        .iter()
        .find(|end| end.role == role)
        .map(|end| local_name(&end.type_name).to_string())
}

/// Return a copy of `navigation` with its end types resolved.
///
/// A missing association or role is tolerated: the affected type is left
/// untouched and no error is raised.
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::import::association::{JoinSides, join_navigation_property};
/// use odata_explorer_sdk::models::{Association, AssociationEnd, NavigationProperty};
///
/// let associations = vec![Association {
///     name: "Customer_Orders".to_string(),
///     ends: vec![
///         AssociationEnd { role: "FromRole_Customer".to_string(), type_name: "Demo.Customer".to_string(), multiplicity: None },
///         AssociationEnd { role: "ToRole_Order".to_string(), type_name: "Demo.Order".to_string(), multiplicity: None },
///     ],
/// }];
/// let nav = NavigationProperty::new("Orders", "Demo.Customer_Orders", "FromRole_Customer", "ToRole_Order");
///
/// let joined = join_navigation_property(&nav, &associations, JoinSides::Both);
/// assert_eq!(joined.from_type.as_deref(), Some("Customer"));
/// assert_eq!(joined.to_type.as_deref(), Some("Order"));
/// ```
pub fn join_navigation_property(
    navigation: &NavigationProperty,
    associations: &[Association],
    sides: JoinSides,
) -> NavigationProperty {
    let mut joined = navigation.clone();

    let Some(association) = find_association(&navigation.relationship, associations) else {
        debug!(
            "Navigation property '{}' references unknown association '{}'",
            navigation.name, navigation.relationship
        );
        return joined;
    };

    if let Some(to_type) = find_end_type(association, &navigation.to_role) {
        joined.to_type = Some(to_type);
    }

    if sides == JoinSides::Both
        && let Some(from_type) = find_end_type(association, &navigation.from_role)
    {
        joined.from_type = Some(from_type);
    }

    joined
}

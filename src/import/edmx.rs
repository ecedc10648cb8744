//! EDMX reader
//!
//! Reads an OData v2 `$metadata` document (`edmx:Edmx` envelope, CSDL
//! `Schema` elements) into a [`RawMetadataDocument`]. Only the parts the
//! normalizer consumes are read: entity types with keys, properties and
//! navigation properties, and associations with their ends.
//!
//! Namespace-prefixed attributes on `Property` elements (SAP `sap:label`,
//! `sap:creatable`, ...) become property extensions named by their local
//! attribute name.

use super::ImportError;
use crate::models::{
    RawAssociation, RawAssociationEnd, RawDataServices, RawEntityType, RawExtension, RawKey,
    RawMetadataDocument, RawNavigationProperty, RawProperty, RawPropertyRef, RawSchema,
};
use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, info};

/// Parse EDMX XML text into a raw metadata document.
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::import::edmx::parse_edmx;
///
/// let xml = r#"<?xml version="1.0" encoding="utf-8"?>
/// <edmx:Edmx Version="1.0" xmlns:edmx="http://schemas.microsoft.com/ado/2007/06/edmx">
///   <edmx:DataServices>
///     <Schema Namespace="Demo" xmlns="http://schemas.microsoft.com/ado/2008/09/edm">
///       <EntityType Name="Customer">
///         <Key><PropertyRef Name="ID"/></Key>
///         <Property Name="ID" Type="Edm.Int32" Nullable="false"/>
///       </EntityType>
///     </Schema>
///   </edmx:DataServices>
/// </edmx:Edmx>"#;
///
/// let doc = parse_edmx(xml).unwrap();
/// assert_eq!(doc.schemas()[0].namespace.as_deref(), Some("Demo"));
/// ```
pub fn parse_edmx(xml: &str) -> Result<RawMetadataDocument, ImportError> {
    let document = read_document(xml).map_err(|e| ImportError::XmlParseError(format!("{:#}", e)))?;
    info!(
        "Read EDMX document with {} schema entries",
        document.schemas().len()
    );
    Ok(document)
}

fn read_document(xml: &str) -> Result<RawMetadataDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut builder = DocumentBuilder::default();

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(element)) => builder.open(&element)?,
            Ok(Event::Empty(element)) => {
                builder.open(&element)?;
                builder.close(element.local_name().as_ref());
            }
            Ok(Event::End(element)) => builder.close(element.local_name().as_ref()),
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => {
                return Err(anyhow::anyhow!("XML parsing error at position {}: {}", position, e));
            }
        }
    }

    Ok(builder.finish())
}

/// One decoded attribute: optional prefix, local name, unescaped value
struct XmlAttribute {
    prefix: Option<String>,
    name: String,
    value: String,
}

fn read_attributes(element: &BytesStart) -> Result<Vec<XmlAttribute>> {
    let element_name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attribute in element.attributes() {
        let attribute = attribute
            .with_context(|| format!("Invalid attribute on element <{}>", element_name))?;
        let key = attribute.key;
        let prefix = key
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());
        let name = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .with_context(|| format!("Invalid value for attribute '{}' on <{}>", name, element_name))?
            .into_owned();
        attributes.push(XmlAttribute {
            prefix,
            name,
            value,
        });
    }

    Ok(attributes)
}

/// Value of an unprefixed attribute
fn attr<'a>(attributes: &'a [XmlAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.prefix.is_none() && a.name == name)
        .map(|a| a.value.as_str())
}

fn required_attr(attributes: &[XmlAttribute], element: &str, name: &str) -> Result<String> {
    attr(attributes, name)
        .map(str::to_string)
        .with_context(|| format!("<{}> is missing required attribute '{}'", element, name))
}

#[derive(Default)]
struct DocumentBuilder {
    saw_data_services: bool,
    schemas: Vec<RawSchema>,
    schema: Option<RawSchema>,
    entity: Option<RawEntityType>,
    in_key: bool,
    association: Option<RawAssociation>,
}

impl DocumentBuilder {
    fn open(&mut self, element: &BytesStart) -> Result<()> {
        match element.local_name().as_ref() {
            b"DataServices" => self.saw_data_services = true,
            b"Schema" => {
                let attributes = read_attributes(element)?;
                self.schema = Some(RawSchema {
                    namespace: attr(&attributes, "Namespace").map(str::to_string),
                    ..Default::default()
                });
            }
            b"EntityType" if self.schema.is_some() => {
                let attributes = read_attributes(element)?;
                self.entity = Some(RawEntityType {
                    name: required_attr(&attributes, "EntityType", "Name")?,
                    ..Default::default()
                });
            }
            b"Key" if self.entity.is_some() => self.in_key = true,
            b"PropertyRef" if self.in_key => {
                let attributes = read_attributes(element)?;
                let name = required_attr(&attributes, "PropertyRef", "Name")?;
                if let Some(entity) = self.entity.as_mut() {
                    entity
                        .key
                        .get_or_insert_with(RawKey::default)
                        .property_ref
                        .push(RawPropertyRef { name });
                }
            }
            b"Property" if self.entity.is_some() => {
                let attributes = read_attributes(element)?;
                let property = read_property(&attributes)?;
                if let Some(entity) = self.entity.as_mut() {
                    entity.property.get_or_insert_with(Vec::new).push(property);
                }
            }
            b"NavigationProperty" if self.entity.is_some() => {
                let attributes = read_attributes(element)?;
                let navigation = RawNavigationProperty {
                    name: required_attr(&attributes, "NavigationProperty", "Name")?,
                    relationship: required_attr(&attributes, "NavigationProperty", "Relationship")?,
                    from_role: required_attr(&attributes, "NavigationProperty", "FromRole")?,
                    to_role: required_attr(&attributes, "NavigationProperty", "ToRole")?,
                };
                if let Some(entity) = self.entity.as_mut() {
                    entity
                        .navigation_property
                        .get_or_insert_with(Vec::new)
                        .push(navigation);
                }
            }
            b"Association" if self.schema.is_some() => {
                let attributes = read_attributes(element)?;
                self.association = Some(RawAssociation {
                    name: required_attr(&attributes, "Association", "Name")?,
                    end: Vec::new(),
                });
            }
            b"End" if self.association.is_some() => {
                let attributes = read_attributes(element)?;
                let end = RawAssociationEnd {
                    role: required_attr(&attributes, "End", "Role")?,
                    type_name: required_attr(&attributes, "End", "Type")?,
                    multiplicity: attr(&attributes, "Multiplicity").map(str::to_string),
                };
                if let Some(association) = self.association.as_mut() {
                    association.end.push(end);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"Schema" => {
                if let Some(schema) = self.schema.take() {
                    debug!(
                        "Read schema {}",
                        schema.namespace.as_deref().unwrap_or("<unnamed>")
                    );
                    self.schemas.push(schema);
                }
            }
            b"EntityType" => {
                if let (Some(entity), Some(schema)) = (self.entity.take(), self.schema.as_mut()) {
                    schema.entity_type.get_or_insert_with(Vec::new).push(entity);
                }
            }
            b"Key" => self.in_key = false,
            b"Association" => {
                if let (Some(association), Some(schema)) =
                    (self.association.take(), self.schema.as_mut())
                {
                    schema
                        .association
                        .get_or_insert_with(Vec::new)
                        .push(association);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> RawMetadataDocument {
        let data_services = if self.saw_data_services || !self.schemas.is_empty() {
            Some(RawDataServices {
                schema: Some(self.schemas),
            })
        } else {
            None
        };
        RawMetadataDocument { data_services }
    }
}

fn read_property(attributes: &[XmlAttribute]) -> Result<RawProperty> {
    let extensions: Vec<RawExtension> = attributes
        .iter()
        .filter(|a| {
            a.prefix
                .as_deref()
                .is_some_and(|prefix| prefix != "xmlns" && prefix != "xml")
        })
        .map(|a| RawExtension {
            name: a.name.clone(),
            value: a.value.clone(),
            namespace: a.prefix.clone(),
        })
        .collect();

    Ok(RawProperty {
        name: required_attr(attributes, "Property", "Name")?,
        type_name: required_attr(attributes, "Property", "Type")?,
        nullable: attr(attributes, "Nullable").map(str::to_string),
        max_length: attr(attributes, "MaxLength").map(str::to_string),
        extensions: if extensions.is_empty() {
            None
        } else {
            Some(extensions)
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAP_METADATA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx Version="1.0" xmlns:edmx="http://schemas.microsoft.com/ado/2007/06/edmx" xmlns:sap="http://www.sap.com/Protocols/SAPData">
  <edmx:DataServices m:DataServiceVersion="2.0" xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
    <Schema Namespace="ZDEMO_SRV" xml:lang="en" xmlns="http://schemas.microsoft.com/ado/2008/09/edm">
      <EntityType Name="Customer" sap:content-version="1">
        <Key>
          <PropertyRef Name="CustomerID"/>
        </Key>
        <Property Name="CustomerID" Type="Edm.String" Nullable="false" MaxLength="10" sap:label="Customer &amp; ID" sap:creatable="false" sap:updatable="false"/>
        <Property Name="Name" Type="Edm.String" MaxLength="80" sap:label="Name"/>
        <NavigationProperty Name="Orders" Relationship="ZDEMO_SRV.Customer_Orders" FromRole="FromRole_Customer" ToRole="ToRole_Order"/>
      </EntityType>
      <EntityType Name="Order">
        <Key>
          <PropertyRef Name="OrderID"/>
          <PropertyRef Name="CustomerID"/>
        </Key>
        <Property Name="OrderID" Type="Edm.Int32" Nullable="false"/>
        <Property Name="CustomerID" Type="Edm.String" Nullable="false"/>
      </EntityType>
      <ComplexType Name="Address">
        <Property Name="Street" Type="Edm.String"/>
      </ComplexType>
      <Association Name="Customer_Orders" sap:content-version="1">
        <End Type="ZDEMO_SRV.Customer" Multiplicity="1" Role="FromRole_Customer"/>
        <End Type="ZDEMO_SRV.Order" Multiplicity="*" Role="ToRole_Order"/>
      </Association>
      <EntityContainer Name="ZDEMO_SRV_Entities" m:IsDefaultEntityContainer="true">
        <AssociationSet Name="Customer_OrdersSet" Association="ZDEMO_SRV.Customer_Orders">
          <End EntitySet="CustomerSet" Role="FromRole_Customer"/>
          <End EntitySet="OrderSet" Role="ToRole_Order"/>
        </AssociationSet>
      </EntityContainer>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

    #[test]
    fn reads_entity_types_and_associations() {
        let doc = parse_edmx(SAP_METADATA).unwrap();
        let schema = &doc.schemas()[0];
        assert_eq!(schema.namespace.as_deref(), Some("ZDEMO_SRV"));

        let entities = schema.entity_type.as_ref().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "Customer");
        assert_eq!(
            entities[1].key_names(),
            vec!["OrderID".to_string(), "CustomerID".to_string()]
        );

        let navigation = &entities[0].navigation_property.as_ref().unwrap()[0];
        assert_eq!(navigation.relationship, "ZDEMO_SRV.Customer_Orders");
        assert_eq!(navigation.to_role, "ToRole_Order");

        let associations = schema.association.as_ref().unwrap();
        assert_eq!(associations.len(), 1);
        // AssociationSet ends are not association ends
        assert_eq!(associations[0].end.len(), 2);
        assert_eq!(associations[0].end[1].multiplicity.as_deref(), Some("*"));
    }

    #[test]
    fn prefixed_property_attributes_become_extensions() {
        let doc = parse_edmx(SAP_METADATA).unwrap();
        let customer = &doc.schemas()[0].entity_type.as_ref().unwrap()[0];
        let property = &customer.property.as_ref().unwrap()[0];
        assert_eq!(property.nullable.as_deref(), Some("false"));
        assert_eq!(property.max_length.as_deref(), Some("10"));

        let extensions = property.extensions.as_ref().unwrap();
        let names: Vec<&str> = extensions.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["label", "creatable", "updatable"]);
        assert_eq!(extensions[0].value, "Customer & ID");
        assert_eq!(extensions[0].namespace.as_deref(), Some("sap"));
    }

    #[test]
    fn complex_type_properties_are_ignored() {
        let doc = parse_edmx(SAP_METADATA).unwrap();
        let entities = doc.schemas()[0].entity_type.as_ref().unwrap();
        assert!(
            entities
                .iter()
                .flat_map(|e| e.property.iter().flatten())
                .all(|p| p.name != "Street")
        );
    }

    #[test]
    fn schema_without_entity_types_has_no_container() {
        let xml = r#"<edmx:Edmx xmlns:edmx="x"><edmx:DataServices><Schema Namespace="Empty"/></edmx:DataServices></edmx:Edmx>"#;
        let doc = parse_edmx(xml).unwrap();
        assert_eq!(doc.schemas().len(), 1);
        assert!(doc.schemas()[0].entity_type.is_none());
    }

    #[test]
    fn malformed_xml_is_reported() {
        let err = parse_edmx("<edmx:Edmx><Schema></edmx:Edmx>").unwrap_err();
        assert!(matches!(err, ImportError::XmlParseError(_)));
    }

    #[test]
    fn missing_required_attribute_is_reported() {
        let xml = r#"<edmx:Edmx xmlns:edmx="x"><edmx:DataServices><Schema><EntityType/></Schema></edmx:DataServices></edmx:Edmx>"#;
        let err = parse_edmx(xml).unwrap_err();
        assert!(err.to_string().contains("Name"));
    }
}

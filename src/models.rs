use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix-keyed registry records, in document order.
pub type RegistryMapping = IndexMap<String, Record>;

const UNIPROT_CORE: &str = "http://purl.uniprot.org/core/";
const DC_TERMS: &str = "http://purl.org/dc/terms/";
const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const FOAF: &str = "http://xmlns.com/foaf/0.1/";
const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Namespace URI and local name of the elements that make up one registry entry.
pub const DESCRIPTION: (&str, &str) = (RDF, "Description");

/// The fields extracted from each `rdf:Description` in the UniProt registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Prefix,
    Identifier,
    Name,
    Type,
    PrimaryTopicOf,
    Category,
    LinkIsExplicit,
    SeeAlso,
    Formatter,
    Citation,
    ExactMatch,
    Comment,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Prefix,
        Field::Identifier,
        Field::Name,
        Field::Type,
        Field::PrimaryTopicOf,
        Field::Category,
        Field::LinkIsExplicit,
        Field::SeeAlso,
        Field::Formatter,
        Field::Citation,
        Field::ExactMatch,
        Field::Comment,
    ];

    /// Key used for this field in the JSON snapshot.
    pub fn key(self) -> &'static str {
        match self {
            Field::Prefix => "prefix",
            Field::Identifier => "identifier",
            Field::Name => "name",
            Field::Type => "type",
            Field::PrimaryTopicOf => "primary_topic_of",
            Field::Category => "category",
            Field::LinkIsExplicit => "link_is_explicit",
            Field::SeeAlso => "see_also",
            Field::Formatter => "formatter",
            Field::Citation => "citation",
            Field::ExactMatch => "exact_match",
            Field::Comment => "comment",
        }
    }

    /// `(namespace URI, local name)` of the element holding this field.
    pub fn element(self) -> (&'static str, &'static str) {
        match self {
            Field::Prefix => (UNIPROT_CORE, "abbreviation"),
            Field::Identifier => (DC_TERMS, "identifier"),
            Field::Name => (RDFS, "label"),
            Field::Type => (RDF, "type"),
            Field::PrimaryTopicOf => (FOAF, "primaryTopicOf"),
            Field::Category => (UNIPROT_CORE, "category"),
            Field::LinkIsExplicit => (UNIPROT_CORE, "linkIsExplicit"),
            Field::SeeAlso => (RDFS, "seeAlso"),
            Field::Formatter => (UNIPROT_CORE, "urlTemplate"),
            Field::Citation => (UNIPROT_CORE, "citation"),
            Field::ExactMatch => (SKOS, "exactMatch"),
            Field::Comment => (RDFS, "comment"),
        }
    }

    /// Find the field stored in the element `{namespace}local_name`.
    pub fn from_element(namespace: &[u8], local_name: &[u8]) -> Option<Field> {
        Field::ALL.into_iter().find(|field| {
            let (ns, local) = field.element();
            ns.as_bytes() == namespace && local.as_bytes() == local_name
        })
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One registry entry. Fields that were absent or empty in the source are `None`
/// and left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_topic_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_is_explicit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub see_also: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Prefix => &self.prefix,
            Field::Identifier => &self.identifier,
            Field::Name => &self.name,
            Field::Type => &self.kind,
            Field::PrimaryTopicOf => &self.primary_topic_of,
            Field::Category => &self.category,
            Field::LinkIsExplicit => &self.link_is_explicit,
            Field::SeeAlso => &self.see_also,
            Field::Formatter => &self.formatter,
            Field::Citation => &self.citation,
            Field::ExactMatch => &self.exact_match,
            Field::Comment => &self.comment,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Prefix => &mut self.prefix,
            Field::Identifier => &mut self.identifier,
            Field::Name => &mut self.name,
            Field::Type => &mut self.kind,
            Field::PrimaryTopicOf => &mut self.primary_topic_of,
            Field::Category => &mut self.category,
            Field::LinkIsExplicit => &mut self.link_is_explicit,
            Field::SeeAlso => &mut self.see_also,
            Field::Formatter => &mut self.formatter,
            Field::Citation => &mut self.citation,
            Field::ExactMatch => &mut self.exact_match,
            Field::Comment => &mut self.comment,
        }
    }
}

/// Tracks which fields of the record being parsed have already been claimed by
/// an element, so only the first matching child counts.
#[derive(Debug, Default)]
pub struct ClaimedFields([bool; 12]);

impl ClaimedFields {
    /// Mark `field` as claimed; returns `false` if it already was.
    pub fn claim(&mut self, field: Field) -> bool {
        !std::mem::replace(&mut self.0[field.index()], true)
    }
}

//! Upstream JSON shapes and their explicit mapping into domain records.
//!
//! Every wire field is optional so that a structurally valid but incomplete
//! record surfaces as a `ValidationError` naming the missing field, instead of
//! an opaque decode failure.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use validator::Validate;

use crate::domain::{Breed, Fact, Group, LifeSpan, ResourceRef, ValidationError, WeightRange};

/// A single-resource response, either `{ "data": record, "links": .. }` or the bare record.
///
/// The shape is chosen by the presence of a top-level `data` key, so a
/// mistyped field inside a wrapped record stays a decode error.
#[derive(Debug)]
pub(crate) enum Document<R> {
    Wrapped { data: R, links: Option<Links> },
    Bare(R),
}

#[derive(Deserialize)]
struct WrappedDocument<R> {
    data: R,
    links: Option<Links>,
}

impl<'de, R: DeserializeOwned> Deserialize<'de> for Document<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("data").is_some() {
            let wrapped: WrappedDocument<R> = serde_json::from_value(value)
                .map_err(<D::Error as serde::de::Error>::custom)?;
            Ok(Document::Wrapped {
                data: wrapped.data,
                links: wrapped.links,
            })
        } else {
            serde_json::from_value(value)
                .map(Document::Bare)
                .map_err(<D::Error as serde::de::Error>::custom)
        }
    }
}

impl<R> Document<R> {
    /// Splits into the record and the envelope-level `links.self`, if any.
    pub(crate) fn into_parts(self) -> (R, Option<String>) {
        match self {
            Document::Wrapped { data, links } => (data, links.and_then(|l| l.self_link)),
            Document::Bare(record) => (record, None),
        }
    }
}

/// A listing response: `{ "data": [..], "meta": {..}, "links": {..} }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListDocument<R> {
    #[serde(default = "Vec::new")]
    pub(crate) data: Vec<R>,
    pub(crate) meta: Option<ListMeta>,
}

impl<R> ListDocument<R> {
    /// Total item count reported by the upstream API, if any.
    pub(crate) fn total(&self) -> Option<u64> {
        let meta = self.meta.as_ref()?;
        meta.total
            .or_else(|| meta.pagination.as_ref().and_then(|p| p.records))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListMeta {
    total: Option<u64>,
    pagination: Option<PaginationMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaginationMeta {
    records: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Links {
    #[serde(rename = "self")]
    self_link: Option<String>,
}

/// Ids arrive as strings or numbers depending on the resource.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Identifier {
    id: Option<RawId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RangeDto<T> {
    min: Option<T>,
    max: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BreedResource {
    id: Option<RawId>,
    attributes: Option<BreedAttributes>,
    relationships: Option<BreedRelationships>,
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BreedAttributes {
    name: Option<String>,
    description: Option<String>,
    life: Option<RangeDto<u32>>,
    male_weight: Option<RangeDto<f64>>,
    female_weight: Option<RangeDto<f64>>,
    hypoallergenic: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BreedRelationships {
    group: Option<ToOne>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToOne {
    data: Option<Identifier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToMany {
    data: Option<Vec<Identifier>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupResource {
    id: Option<RawId>,
    attributes: Option<GroupAttributes>,
    relationships: Option<GroupRelationships>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupAttributes {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRelationships {
    breeds: Option<ToMany>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FactResource {
    id: Option<RawId>,
    attributes: Option<FactAttributes>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FactAttributes {
    body: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingField(field.to_string()))
}

/// `None` when the range is absent or empty, an error when half-populated.
fn range_pair<T>(range: Option<RangeDto<T>>, field: &str) -> Result<Option<(T, T)>, ValidationError> {
    match range {
        None | Some(RangeDto { min: None, max: None }) => Ok(None),
        Some(RangeDto { min, max }) => Ok(Some((
            required(min, &format!("{field}.min"))?,
            required(max, &format!("{field}.max"))?,
        ))),
    }
}

fn weight_range(
    range: Option<RangeDto<f64>>,
    field: &str,
) -> Result<Option<WeightRange>, ValidationError> {
    range_pair(range, field)?
        .map(|(min, max)| WeightRange::new(min, max))
        .transpose()
}

/// Maps a breed record; `envelope_link` is used when the record carries no link of its own.
pub(crate) fn breed_from_resource(
    resource: BreedResource,
    envelope_link: Option<String>,
) -> Result<Breed, ValidationError> {
    let id = required(resource.id, "id")?.into_string();
    let attributes = required(resource.attributes, "attributes")?;
    let name = required(attributes.name, "attributes.name")?;

    let life = range_pair(attributes.life, "attributes.life")?
        .map(|(min, max)| LifeSpan::new(min, max))
        .transpose()?;
    let male_weight = weight_range(attributes.male_weight, "attributes.male_weight")?;
    let female_weight = weight_range(attributes.female_weight, "attributes.female_weight")?;

    let group = resource
        .relationships
        .and_then(|r| r.group)
        .and_then(|g| g.data)
        .map(|data| required(data.id, "relationships.group.data.id"))
        .transpose()?
        .map(|id| ResourceRef::group(id.into_string()));

    let link = resource
        .links
        .and_then(|l| l.self_link)
        .or(envelope_link);

    let breed = Breed {
        description: attributes.description,
        life,
        male_weight,
        female_weight,
        hypoallergenic: attributes.hypoallergenic.unwrap_or(false),
        group,
        link,
        ..Breed::new(id, name)
    };
    breed.validate()?;
    Ok(breed)
}

pub(crate) fn group_from_resource(
    resource: GroupResource,
    _envelope_link: Option<String>,
) -> Result<Group, ValidationError> {
    let id = required(resource.id, "id")?.into_string();
    let attributes = required(resource.attributes, "attributes")?;
    let name = required(attributes.name, "attributes.name")?;

    let breeds = resource
        .relationships
        .and_then(|r| r.breeds)
        .and_then(|b| b.data)
        .unwrap_or_default()
        .into_iter()
        .map(|reference| {
            required(reference.id, "relationships.breeds.data.id")
                .map(|id| ResourceRef::breed(id.into_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let group = Group {
        breeds,
        ..Group::new(id, name)
    };
    group.validate()?;
    Ok(group)
}

pub(crate) fn fact_from_resource(
    resource: FactResource,
    _envelope_link: Option<String>,
) -> Result<Fact, ValidationError> {
    let id = required(resource.id, "id")?.into_string();
    let attributes = required(resource.attributes, "attributes")?;
    let body = required(attributes.body, "attributes.body")?;

    let fact = Fact::new(id, body);
    fact.validate()?;
    Ok(fact)
}

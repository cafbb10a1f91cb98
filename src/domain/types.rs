use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::ValidationError;

/// Represents a unique identifier for domain entities.
pub type EntityId = String;

/// Fixed type tag carried by every resource and resource reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Breed,
    Group,
    Fact,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Breed => "breed",
            ResourceType::Group => "group",
            ResourceType::Fact => "fact",
        }
    }

    fn breed() -> Self {
        ResourceType::Breed
    }

    fn group() -> Self {
        ResourceType::Group
    }

    fn fact() -> Self {
        ResourceType::Fact
    }
}

/// Typed pointer to another resource (breed → group, group → breeds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceRef {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

impl ResourceRef {
    pub fn breed(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceType::Breed,
        }
    }

    pub fn group(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceType::Group,
        }
    }
}

#[derive(Deserialize)]
struct RangeRepr<T> {
    min: T,
    max: T,
}

fn check_range<T: PartialOrd>(field: &str, min: &T, max: &T) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "'min' cannot be greater than 'max'".to_string(),
        });
    }
    Ok(())
}

/// Expected life span of a breed, in years.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RangeRepr<u32>")]
pub struct LifeSpan {
    min: u32,
    max: u32,
}

impl LifeSpan {
    /// Fails when `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self, ValidationError> {
        check_range("life", &min, &max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl TryFrom<RangeRepr<u32>> for LifeSpan {
    type Error = ValidationError;

    fn try_from(repr: RangeRepr<u32>) -> Result<Self, Self::Error> {
        Self::new(repr.min, repr.max)
    }
}

/// Weight range of a breed, in kilograms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RangeRepr<f64>")]
pub struct WeightRange {
    min: f64,
    max: f64,
}

impl WeightRange {
    /// Fails when `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        check_range("weight", &min, &max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl TryFrom<RangeRepr<f64>> for WeightRange {
    type Error = ValidationError;

    fn try_from(repr: RangeRepr<f64>) -> Result<Self, Self::Error> {
        Self::new(repr.min, repr.max)
    }
}

/// A dog breed as republished by the facade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Breed {
    #[validate(length(min = 1))]
    pub id: EntityId,
    #[serde(rename = "type", default = "ResourceType::breed")]
    pub kind: ResourceType,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<LifeSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male_weight: Option<WeightRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female_weight: Option<WeightRange>,
    #[serde(default)]
    pub hypoallergenic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Breed {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceType::Breed,
            name: name.into(),
            description: None,
            life: None,
            male_weight: None,
            female_weight: None,
            hypoallergenic: false,
            group: None,
            link: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_life(mut self, life: LifeSpan) -> Self {
        self.life = Some(life);
        self
    }

    pub fn with_weights(mut self, male: Option<WeightRange>, female: Option<WeightRange>) -> Self {
        self.male_weight = male;
        self.female_weight = female;
        self
    }

    pub fn with_hypoallergenic(mut self, hypoallergenic: bool) -> Self {
        self.hypoallergenic = hypoallergenic;
        self
    }

    pub fn with_group(mut self, group_id: impl Into<EntityId>) -> Self {
        self.group = Some(ResourceRef::group(group_id));
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// A breed group and its ordered membership list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Group {
    #[validate(length(min = 1))]
    pub id: EntityId,
    #[serde(rename = "type", default = "ResourceType::group")]
    pub kind: ResourceType,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub breeds: Vec<ResourceRef>,
}

impl Group {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceType::Group,
            name: name.into(),
            breeds: Vec::new(),
        }
    }

    pub fn with_breeds<I, S>(mut self, breed_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntityId>,
    {
        self.breeds = breed_ids.into_iter().map(ResourceRef::breed).collect();
        self
    }

    /// Whether `breed_id` is listed as a member of this group.
    pub fn contains_breed(&self, breed_id: &str) -> bool {
        self.breeds.iter().any(|b| b.id == breed_id)
    }
}

/// A free-text dog fact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct Fact {
    #[validate(length(min = 1))]
    pub id: EntityId,
    #[serde(rename = "type", default = "ResourceType::fact")]
    pub kind: ResourceType,
    pub body: String,
}

impl Fact {
    pub fn new(id: impl Into<EntityId>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceType::Fact,
            body: body.into(),
        }
    }
}

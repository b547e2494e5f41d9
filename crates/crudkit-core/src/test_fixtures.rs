use crate::{
    model::field::FieldKind,
    traits::{EntitySchema, FieldValue},
    value::Value,
};
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

///
/// Tag
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Tag {
    #[serde(rename = "Id")]
    pub(crate) id: i64,
    #[serde(rename = "Label")]
    pub(crate) label: Option<String>,
}

entity_model! {
    Tag,
    path = "crudkit_core::test_fixtures::Tag",
    entity_name = "Tag",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Int),
        (label, "Label", FieldKind::Text),
    ],
}

///
/// Order
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Order {
    #[serde(rename = "Id")]
    pub(crate) id: i64,
    #[serde(rename = "Name")]
    pub(crate) name: Option<String>,
    #[serde(rename = "Tags")]
    pub(crate) tags: Vec<Tag>,
}

entity_model! {
    Order,
    path = "crudkit_core::test_fixtures::Order",
    entity_name = "Order",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Int),
        (name, "Name", FieldKind::Text),
        (tags, "Tags", FieldKind::List(&FieldKind::Record(Tag::MODEL))),
    ],
}

///
/// CompanyStatus
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum CompanyStatus {
    #[default]
    Active,
    Suspended,
}

impl FieldValue for CompanyStatus {
    fn to_value(&self) -> Value {
        let variant = match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        };

        Value::Enum(variant.to_string())
    }
}

///
/// Company
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Company {
    #[serde(rename = "Id")]
    pub(crate) id: Ulid,
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "CNPJ")]
    pub(crate) cnpj: Option<String>,
    #[serde(rename = "Employees")]
    pub(crate) employees: u32,
    #[serde(rename = "Status")]
    pub(crate) status: CompanyStatus,
}

entity_model! {
    Company,
    path = "crudkit_core::test_fixtures::Company",
    entity_name = "Company",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Ulid),
        (name, "Name", FieldKind::Text),
        (cnpj, "CNPJ", FieldKind::Text),
        (employees, "Employees", FieldKind::Uint),
        (status, "Status", FieldKind::Enum(&["Active", "Suspended"])),
    ],
}

impl Company {
    pub(crate) fn new(seq: u128, name: &str, cnpj: Option<&str>) -> Self {
        Self {
            id: Ulid::from_parts(1_700_000_000_000, seq),
            name: name.to_string(),
            cnpj: cnpj.map(str::to_string),
            ..Self::default()
        }
    }
}

///
/// Reading
/// Float-valued record.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Reading {
    #[serde(rename = "Id")]
    pub(crate) id: i64,
    #[serde(rename = "Sensor")]
    pub(crate) sensor: String,
    #[serde(rename = "Value")]
    pub(crate) value: f64,
}

entity_model! {
    Reading,
    path = "crudkit_core::test_fixtures::Reading",
    entity_name = "Reading",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Int),
        (sensor, "Sensor", FieldKind::Text),
        (value, "Value", FieldKind::Float),
    ],
}

impl Reading {
    pub(crate) fn new(id: i64, value: f64) -> Self {
        Self {
            id,
            sensor: format!("s{id}"),
            value,
        }
    }
}

///
/// Warehouse
/// Carries a matrix of nested records.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Warehouse {
    #[serde(rename = "Id")]
    pub(crate) id: Uuid,
    #[serde(rename = "Grid")]
    pub(crate) grid: Vec<Vec<Tag>>,
}

entity_model! {
    Warehouse,
    path = "crudkit_core::test_fixtures::Warehouse",
    entity_name = "Warehouse",
    primary_key = "Id",
    fields = [
        (id, "Id", FieldKind::Uuid),
        (grid, "Grid", FieldKind::List(&FieldKind::List(&FieldKind::Record(Tag::MODEL)))),
    ],
}

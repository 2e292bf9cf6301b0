//! Category registry.
//!
//! Each list category maps to a [`PipelineDefinition`]. The built-in
//! definitions are assembled by one builder function per category; derived
//! categories (the `ex*` variants and PDRAs) take a base definition by value
//! and replace only what differs, so no definition is shared or aliased.
//!
//! # Example
//!
//! ```ignore
//! use mdlist_core::Registry;
//!
//! let registry = Registry::builtin("ndl21");
//! let grants = registry.get("grants").unwrap();
//! assert_eq!(grants.template, "listgrant");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::step::{Augmentor, Converter, FilterSpec, Predicate, SortSpec, Step};

/// Supervisor id used when none is configured.
pub const DEFAULT_SUPERVISOR: &str = "ndl21";

/// Everything needed to turn a raw table into one category's list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineDefinition {
    /// Converters and augmentors. Converters always run before augmentors;
    /// within each family, declared order is kept.
    pub steps: Vec<Step>,
    pub sort: SortSpec,
    pub filter: FilterSpec,
    /// Template name without extension.
    pub template: String,
}

impl PipelineDefinition {
    pub fn new(template: impl Into<String>, sort: SortSpec) -> Self {
        Self {
            steps: Vec::new(),
            sort,
            filter: FilterSpec::all(),
            template: template.into(),
        }
    }

    pub fn convert(mut self, converter: Converter) -> Self {
        self.steps.push(converter.into());
        self
    }

    pub fn augment(mut self, augmentor: Augmentor) -> Self {
        self.steps.push(augmentor.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<FilterSpec>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn converters(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|step| step.is_converter())
    }

    pub fn augmentors(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|step| !step.is_converter())
    }
}

/// Category name to pipeline definition.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, PipelineDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in categories, with `supervisor` as the id that student and
    /// PDRA lists are filtered on.
    pub fn builtin(supervisor: &str) -> Self {
        let mut registry = Self::new();
        registry.register("talks", talks());
        registry.register("publications", publications());
        registry.register("grants", grants());
        registry.register("exgrants", former(grants()));
        registry.register("teaching", teaching());
        registry.register("exteaching", former(teaching()));
        registry.register("meetings", meetings());
        registry.register("students", students(supervisor));
        registry.register(
            "exstudents",
            former_people(students(supervisor), supervisor, PHD_STUDENT),
        );
        registry.register("pdras", pdras(supervisor));
        registry.register(
            "expdras",
            former_people(pdras(supervisor), supervisor, RESEARCH_ASSOCIATE),
        );
        registry
    }

    /// Register `definition` under `category`, replacing any previous one.
    pub fn register(&mut self, category: impl Into<String>, definition: PipelineDefinition) {
        self.definitions.insert(category.into(), definition);
    }

    pub fn get(&self, category: &str) -> Option<&PipelineDefinition> {
        self.definitions.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PipelineDefinition)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

const PHD_STUDENT: &str = "PhD Student";
const RESEARCH_ASSOCIATE: &str = "Research Associate";

pub fn talks() -> PipelineDefinition {
    PipelineDefinition::new("listtalk", SortSpec::descending(["date"]))
        .convert(Converter::to_date(["date"]))
        .augment(Augmentor::add_month("date", "month"))
        .augment(Augmentor::add_year("date", "year"))
        .with_filter(Predicate::recent("year"))
}

pub fn publications() -> PipelineDefinition {
    PipelineDefinition::new("listpaper", SortSpec::descending(["year", "published"]))
        .convert(Converter::to_date(["date", "published"]))
        .convert(Converter::to_integer(["year"]))
        .augment(Augmentor::fill_month("published", "month"))
        .augment(Augmentor::fill_year("published", "year"))
        .augment(Augmentor::add_columns(["published"]))
        .with_filter(Predicate::recent("year"))
}

pub fn grants() -> PipelineDefinition {
    PipelineDefinition::new("listgrant", SortSpec::descending(["start", "end"]))
        .convert(Converter::year_to_iso("start", 1, 1))
        .convert(Converter::year_to_iso("end", 12, 31))
        .convert(Converter::to_date(["start", "end"]))
        .convert(Converter::to_integer(["amount"]))
        .augment(Augmentor::add_columns(["end"]))
        .with_filter(Predicate::current("start", "end"))
}

pub fn teaching() -> PipelineDefinition {
    PipelineDefinition::new(
        "listteaching",
        SortSpec::descending(["start", "end", "semester"]),
    )
    .convert(Converter::to_date(["start", "end"]))
    .augment(Augmentor::add_columns(["end", "semester"]))
    .with_filter(Predicate::current("start", "end"))
}

pub fn meetings() -> PipelineDefinition {
    PipelineDefinition::new(
        "listmeeting",
        SortSpec::descending(["start", "end", "semester"]),
    )
    .convert(Converter::to_date(["start", "end"]))
    .augment(Augmentor::fill_year("start", "year"))
    .augment(Augmentor::add_columns(["end", "semester"]))
    .with_filter(Predicate::recent("year"))
}

pub fn students(supervisor: &str) -> PipelineDefinition {
    PipelineDefinition::new("liststudent", SortSpec::descending(["start"]))
        .convert(Converter::to_date(["start", "end"]))
        .augment(Augmentor::fill_constant("supervisor", supervisor))
        .with_filter(current_people(supervisor, PHD_STUDENT))
}

/// Students with the PDRA template and position.
pub fn pdras(supervisor: &str) -> PipelineDefinition {
    students(supervisor)
        .with_template("listpdra")
        .with_filter(current_people(supervisor, RESEARCH_ASSOCIATE))
}

/// `base` restricted to rows whose end date has passed.
pub fn former(base: PipelineDefinition) -> PipelineDefinition {
    base.with_filter(Predicate::former("end"))
}

fn current_people(supervisor: &str, position: &str) -> FilterSpec {
    FilterSpec::and(vec![
        Predicate::current_or_flagged("start", "end", "current"),
        Predicate::equals("position", position),
        Predicate::contains("supervisor", supervisor),
    ])
}

fn former_people(base: PipelineDefinition, supervisor: &str, position: &str) -> PipelineDefinition {
    base.with_filter(FilterSpec::and(vec![
        Predicate::former("end"),
        Predicate::equals("position", position),
        Predicate::contains("supervisor", supervisor),
    ]))
}

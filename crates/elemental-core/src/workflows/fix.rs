use super::load_rules;
use super::patch::{PatchReport, patch_artifact};
use crate::core::derive::{DerivedFields, derive_fields};
use crate::core::derive::lookup;
use crate::core::io::feed::JsonFeed;
use crate::core::io::literal::{Literal, LiteralStyle};
use crate::core::io::traits::RawDataSource;
use crate::core::models::element::{MAX_ATOMIC_NUMBER, MIN_ATOMIC_NUMBER, is_supported_atomic_number};
use crate::core::models::raw::RawElement;
use crate::core::patch::literal_style_of;
use crate::core::patch::request::PatchRequest;
use crate::engine::config::{DerivedField, FixConfig, FixTask};
use crate::engine::error::PipelineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::rules::RuleSet;
use tracing::{debug, info, instrument};

/// Runs one targeted fix-up pass against an existing artifact.
///
/// Each pass is expressed as a patch request and goes through the same
/// read-patch-commit cycle as a user-supplied patch, so only the targeted fields
/// change and every other byte of the artifact is preserved.
#[instrument(skip_all, name = "fix_workflow")]
pub fn run(config: &FixConfig, reporter: &ProgressReporter) -> Result<PatchReport, PipelineError> {
    let (rules, raw) = reporter.phase("Loading", || -> Result<_, PipelineError> {
        let rules = load_rules(config.rules_path.as_deref())?;
        let raw = match &config.task {
            FixTask::Derived { input_path, .. } => JsonFeed::read_from_path(input_path)?,
            FixTask::Radii | FixTask::Names => Vec::new(),
        };
        Ok((rules, raw))
    })?;

    patch_artifact(
        &config.artifact_path,
        &config.anchor,
        config.strict,
        config.dry_run,
        reporter,
        |text| {
            let style = literal_style_of(text);
            let request = match &config.task {
                FixTask::Radii => radius_request(&rules, style),
                FixTask::Names => names_request(&rules, style),
                FixTask::Derived { fields, .. } => derived_request(&raw, fields, &rules, style),
            };
            info!(
                "Fix pass will touch {} field(s) across {} record(s).",
                request.field_count(),
                request.record_count()
            );
            Ok(request)
        },
    )
}

/// Sets `atomicRadius` for every correction target, whether or not the rule set
/// enables the correction pass for generation.
pub fn radius_request(rules: &RuleSet, style: LiteralStyle) -> PatchRequest {
    let mut request = PatchRequest::new();
    for (atomic_number, radius) in rules.radius_corrections() {
        request.set(
            atomic_number,
            DerivedField::AtomicRadius.key(),
            Literal::from(radius).render(style),
        );
    }
    request
}

/// Sets `alternativeNames` on every record that has at least one curated name.
pub fn names_request(rules: &RuleSet, style: LiteralStyle) -> PatchRequest {
    let mut request = PatchRequest::new();
    for atomic_number in MIN_ATOMIC_NUMBER..=MAX_ATOMIC_NUMBER {
        if let Some(names) = lookup::alternative_names(atomic_number, rules) {
            request.set(
                atomic_number,
                DerivedField::AlternativeNames.key(),
                Literal::from(&names).render(style),
            );
        }
    }
    request
}

/// Recomputes `fields` from the raw feed for every supported entry.
///
/// A record whose alternative names resolve to nothing keeps whatever it has.
pub fn derived_request(
    raw: &[RawElement],
    fields: &[DerivedField],
    rules: &RuleSet,
    style: LiteralStyle,
) -> PatchRequest {
    let mut request = PatchRequest::new();
    for entry in raw {
        if !is_supported_atomic_number(entry.number) {
            debug!("Ignoring feed entry with atomic number {}.", entry.number);
            continue;
        }
        let atomic_number = entry.number as u32;
        let derived = derive_fields(atomic_number, entry, rules);
        for field in fields {
            if let Some(literal) = derived_literal(&derived, *field) {
                request.set(atomic_number, field.key(), literal.render(style));
            }
        }
    }
    request
}

fn derived_literal(derived: &DerivedFields, field: DerivedField) -> Option<Literal> {
    Some(match field {
        DerivedField::Category => Literal::from(derived.category),
        DerivedField::ElectronConfig => Literal::from(derived.electron_config.as_str()),
        DerivedField::AtomicRadius => Literal::from(derived.atomic_radius),
        DerivedField::OxidationStates => Literal::from(derived.oxidation_states.as_slice()),
        DerivedField::ValenceElectrons => Literal::from(derived.valence_electrons),
        DerivedField::AlternativeNames => Literal::from(derived.alternative_names.as_ref()?),
    })
}

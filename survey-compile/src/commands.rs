use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use tracing::{info, info_span};

use survey_factory::{
    DefaultStepFactory, DirectoryResources, FactoryConfig, PassthroughResources, ReportedDefect,
    Task, TaskResult, next_step_identifier, union_data_groups,
};

use crate::cli::{CompileArgs, DataGroupsArgs, NavigateArgs, SourceArgs};

/// A compiled document and the defects found while building it.
pub struct Compiled {
    pub task: Task,
    pub defects: Vec<ReportedDefect>,
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn load_document(source: &SourceArgs) -> Result<Value> {
    match (&source.document, &source.example) {
        (_, Some(name)) => example_surveys::by_name(name).ok_or_else(|| {
            anyhow!(
                "unknown example `{name}`; expected one of: {}",
                example_surveys::NAMES.join(", ")
            )
        }),
        (Some(path), None) => read_json(path),
        (None, None) => bail!("no survey document given"),
    }
}

fn load_config(path: Option<&Path>) -> Result<FactoryConfig> {
    let Some(path) = path else {
        return Ok(FactoryConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    FactoryConfig::from_json(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Read the results of a run, or an empty result when none are given.
pub fn load_results(path: Option<&Path>, task_id: &str) -> Result<TaskResult> {
    let Some(path) = path else {
        return Ok(TaskResult::new(task_id));
    };
    let value = read_json(path)?;
    serde_json::from_value(value).with_context(|| format!("parse results {}", path.display()))
}

/// Build the task described by `source`.
pub fn compile(source: &SourceArgs) -> Result<Compiled> {
    let span = info_span!("compile", task = %source.task_id);
    let _guard = span.enter();

    let document = load_document(source)?;
    let config = load_config(source.config.as_deref())?;
    let factory = match &source.resources {
        Some(root) => DefaultStepFactory::new(config, DirectoryResources::new(root)),
        None => DefaultStepFactory::new(config, PassthroughResources),
    }
    .with_document(&document)?;

    let task = factory.create_task(&source.task_id);
    let defects = factory.take_defects();
    info!(steps = task.len(), defects = defects.len(), "compiled survey");
    Ok(Compiled { task, defects })
}

/// The compiled task as JSON text.
pub fn run_compile(args: &CompileArgs) -> Result<String> {
    let compiled = compile(&args.source)?;
    if args.deny_defects && !compiled.defects.is_empty() {
        let listed: Vec<String> = compiled
            .defects
            .iter()
            .map(|reported| format!("{}: {}", reported.item, reported.defect))
            .collect();
        bail!(
            "{} build defect(s):\n  {}",
            listed.len(),
            listed.join("\n  ")
        );
    }
    let json = if args.compact {
        serde_json::to_string(&compiled.task)
    } else {
        serde_json::to_string_pretty(&compiled.task)
    };
    json.context("serialize task")
}

/// The step that follows `--current`, or `None` at the end of the task.
pub fn run_navigate(args: &NavigateArgs) -> Result<Option<String>> {
    let compiled = compile(&args.source)?;
    let results = load_results(args.results.as_deref(), &args.source.task_id)?;
    if let Some(current) = &args.current {
        if compiled.task.step(current).is_none() {
            bail!("no step `{current}` in task `{}`", compiled.task.identifier);
        }
    }
    let next = next_step_identifier(&compiled.task, args.current.as_deref(), &results);
    info!(current = ?args.current, next = ?next, "navigated");
    Ok(next)
}

/// The participant's groups after folding every data-group answer.
pub fn run_data_groups(args: &DataGroupsArgs) -> Result<(BTreeSet<String>, bool)> {
    let compiled = compile(&args.source)?;
    let results = load_results(Some(args.results.as_path()), &args.source.task_id)?;
    let current: BTreeSet<String> = args
        .groups
        .iter()
        .map(|group| group.trim())
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect();
    Ok(union_data_groups(&compiled.task, &current, &results))
}

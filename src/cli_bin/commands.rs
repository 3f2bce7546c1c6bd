//! CLI command handlers that bridge CLI arguments to library operations
//!
//! Each handler loads every input document, runs its query per document and
//! prints the results. With a single input the result is printed as is; with
//! several inputs the output is an object keyed by file name, even when only
//! some of them produced a result.

use crate::cli_bin::args::*;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use mf2query::{
    DocumentReader, FileResolver, Jf2Options, JsonPathQuery, Mf2Error, Node, NodeList,
    OutputTarget, OutputWriter, ParsedDocument, Query, ReaderConfig, ResolverConfig,
    WriterConfig,
};
use serde_json::Value as JsonValue;
use std::io::Read;

/// Execute the items command
pub fn items_command(args: ItemsArgs) -> Result<()> {
    debug!("Executing items command with args: {:?}", args);

    let documents = load_documents(&args.files)?;
    let keyed = documents.len() > 1;
    let mut results = Vec::new();
    for (label, document) in documents {
        let query = Query::new(&document);
        let items = select_items(&query, args.type_.as_deref());
        let types = items
            .iter()
            .map(|item| item.types().map(|t| JsonValue::from(t.to_vec())))
            .collect::<mf2query::Result<Vec<_>>>()?;
        results.push((label, JsonValue::Array(types)));
    }

    emit(results, keyed, &args.output)
}

/// Execute the jf2 command
pub fn jf2_command(args: Jf2Args) -> Result<()> {
    debug!("Executing jf2 command with args: {:?}", args);

    let options = if args.drop_empty {
        Jf2Options::dropping_empty()
    } else {
        Jf2Options::default()
    };
    let jsonpath = args
        .query
        .as_deref()
        .map(|q| JsonPathQuery::new_with_options(q, !args.no_auto_root))
        .transpose()?;

    let documents = load_documents(&args.files)?;
    let keyed = documents.len() > 1;
    let mut results = Vec::new();
    for (label, document) in documents {
        let query = Query::new(&document);
        let items = select_items(&query, args.type_.as_deref());
        if items.is_empty() {
            info!("No matching items in {}", label);
            continue;
        }

        let jf2 = if args.all {
            let converted = items.to_jf2_all_with(&options)?;
            JsonValue::Array(converted.into_iter().map(JsonValue::from).collect())
        } else {
            items.to_jf2_with(&options)?.into_value()
        };

        let value = match &jsonpath {
            Some(path) => path.select(&jf2),
            None => jf2,
        };
        results.push((label, value));
    }

    emit(results, keyed, &args.output)
}

/// Execute the get command
pub fn get_command(args: GetArgs) -> Result<()> {
    debug!("Executing get command with args: {:?}", args);

    let documents = load_documents(&args.files)?;
    let keyed = documents.len() > 1;
    let mut results = Vec::new();
    for (label, document) in documents {
        let query = Query::new(&document);
        let items = select_items(&query, args.type_.as_deref());
        if items.is_empty() {
            info!("No matching items in {}", label);
            continue;
        }

        let values = items.prop(&args.prop)?;
        if values.is_empty() {
            warn!("Property '{}' not found in {}", args.prop, label);
            continue;
        }

        let value = if args.all {
            let rendered = values
                .iter()
                .map(|node| render_value(node, args.html))
                .collect::<mf2query::Result<Vec<_>>>()?;
            JsonValue::Array(rendered)
        } else {
            render_value(&values.first()?, args.html)?
        };
        results.push((label, value));
    }

    emit(results, keyed, &args.output)
}

/// Execute the rel command
pub fn rel_command(args: RelArgs) -> Result<()> {
    debug!("Executing rel command with args: {:?}", args);

    let documents = load_documents(&args.files)?;
    let keyed = documents.len() > 1;
    let mut results = Vec::new();
    for (label, document) in documents {
        match Query::new(&document).rel(&args.name) {
            Some(data) => results.push((label, data.clone())),
            None => info!("No '{}' relation in {}", args.name, label),
        }
    }

    emit(results, keyed, &args.output)
}

/// Execute the validate command
pub fn validate_command(args: ValidateArgs) -> Result<()> {
    debug!("Executing validate command with args: {:?}", args);

    let outcomes = read_inputs(&args.files, std::io::stdin().lock())?;
    if outcomes.is_empty() {
        bail!("No files found to validate");
    }
    report_validation(&outcomes)
}

/// Print one line per input and fail if any of them was invalid
fn report_validation(outcomes: &[(String, mf2query::Result<ParsedDocument>)]) -> Result<()> {
    let mut failures = 0;
    for (label, outcome) in outcomes {
        match outcome {
            Ok(document) => println!("{}: OK ({} items)", label, document.items().len()),
            Err(e) => {
                failures += 1;
                println!("{}: Invalid ({})", label, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} inputs failed validation", failures, outcomes.len());
    }
    Ok(())
}

fn select_items<'a>(query: &Query<'a>, type_: Option<&str>) -> NodeList<'a> {
    let items = query.items();
    match type_ {
        Some(type_name) => items.by_type(type_name),
        None => items,
    }
}

/// A property value as output JSON
///
/// Nested items without a `value` of their own are printed as JF2.
fn render_value(node: &Node<'_>, html: bool) -> mf2query::Result<JsonValue> {
    if html {
        return Ok(JsonValue::from(node.html()?));
    }
    match node.value() {
        Ok(value) => Ok(JsonValue::from(value)),
        Err(Mf2Error::MissingValue { .. }) => Ok(node.to_jf2()?.into_value()),
        Err(e) => Err(e),
    }
}

/// Load every input, or stdin when no paths were given
fn load_documents(file_options: &CommonFileOptions) -> Result<Vec<(String, ParsedDocument)>> {
    read_inputs(file_options, std::io::stdin().lock())?
        .into_iter()
        .map(|(label, outcome)| {
            let document = outcome.with_context(|| format!("failed to read {}", label))?;
            Ok((label, document))
        })
        .collect()
}

/// Read each resolved file, or `stdin` labelled `-` when no paths were given
///
/// Per-input read errors are kept next to their label so callers can decide
/// whether to stop or report and go on.
fn read_inputs<R: Read>(
    file_options: &CommonFileOptions,
    stdin: R,
) -> Result<Vec<(String, mf2query::Result<ParsedDocument>)>> {
    let reader = create_reader(file_options);

    if file_options.files.is_empty() {
        debug!("Reading document from stdin");
        return Ok(vec![("-".to_string(), reader.read_from(stdin))]);
    }

    let paths = resolve_files(file_options)?;
    if paths.is_empty() {
        warn!("No files found to process");
    }

    Ok(paths
        .into_iter()
        .map(|path| (path.display().to_string(), reader.read_file(&path)))
        .collect())
}

fn resolve_files(file_options: &CommonFileOptions) -> Result<Vec<std::path::PathBuf>> {
    let config = ResolverConfig {
        follow_links: file_options.follow_links,
        max_depth: file_options.max_depth,
        include_hidden: file_options.include_hidden,
        include_extensions: if file_options.extensions.is_empty() {
            vec!["json".to_string()]
        } else {
            file_options
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect()
        },
        exclude_patterns: file_options.exclude_patterns.clone(),
    };

    Ok(FileResolver::with_config(config).resolve_paths(&file_options.files)?)
}

fn create_reader(file_options: &CommonFileOptions) -> DocumentReader {
    DocumentReader::with_config(ReaderConfig {
        validate_on_read: !file_options.no_validate,
        ..Default::default()
    })
}

fn create_writer(output: &OutputArgs) -> OutputWriter {
    OutputWriter::with_config(WriterConfig {
        format: output.format.into(),
        pretty: !output.compact,
        atomic_writes: !output.no_atomic,
    })
}

/// Print the results, keyed by file name when there were several inputs
fn emit(results: Vec<(String, JsonValue)>, keyed: bool, output: &OutputArgs) -> Result<()> {
    let Some(value) = fold_results(results, keyed) else {
        info!("No matching values found");
        return Ok(());
    };

    let target = match &output.output {
        Some(path) => OutputTarget::File(path.clone()),
        None => OutputTarget::Stdout,
    };
    create_writer(output).write(&value, &target)?;
    Ok(())
}

fn fold_results(mut results: Vec<(String, JsonValue)>, keyed: bool) -> Option<JsonValue> {
    if results.is_empty() {
        None
    } else if keyed {
        Some(JsonValue::Object(results.into_iter().collect()))
    } else {
        Some(results.remove(0).1)
    }
}

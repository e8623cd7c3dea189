use crate::cli::StorageArgs;
use crate::infra::{file_backed_service, parse_assignment, prepare};
use clap::Args;
use job_intake::applications::{
    render_cards, ApplicationDraft, ApplicationIntakeService, BlobStorage, ErrorBoundary, Field,
    IntakeError, Locale, Rendered, FIELDS,
};
use job_intake::error::AppError;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SubmitArgs {
    /// JSON object with the form fields; use `-` to read it from stdin
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Set a single field, e.g. `--set name="Joana Silva"`; applied after --file
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub(crate) fields: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Directory receiving the export file
    #[arg(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
    /// Print the export to stdout instead of writing a file
    #[arg(long)]
    pub(crate) stdout: bool,
}

pub(crate) fn run_submit(args: SubmitArgs, storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    let service = file_backed_service(&config);
    let draft = build_draft(args)?;

    match service.submit(&draft) {
        Ok(record) => {
            println!("{} (id {})", submitted_message(config.locale), record.id);
            Ok(())
        }
        Err(IntakeError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                println!("{:<18} {}", field.key(), message);
            }
            Err(IntakeError::Validation(errors).into())
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_list(storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    let service = file_backed_service(&config);
    write_list(&service, &mut std::io::stdout().lock())
}

/// Cards through the fault boundary; a fault prints the notice and the reset command instead.
fn write_list<S, W>(service: &ApplicationIntakeService<S>, out: &mut W) -> Result<(), AppError>
where
    S: BlobStorage + 'static,
    W: Write,
{
    let locale = service.locale();
    match ErrorBoundary::new(locale).render(|| Ok(render_cards(&service.cards()?, locale))) {
        Rendered::View(text) => write!(out, "{text}")?,
        Rendered::Fallback(notice) => {
            writeln!(out, "{}", notice.title)?;
            writeln!(out, "{}", notice.hint)?;
            writeln!(out, "{}: job-intake-api reset", notice.action)?;
        }
    }
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs, storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    let service = file_backed_service(&config);

    if args.stdout {
        println!("{}", service.export()?);
        return Ok(());
    }

    let path = service.export_to(&args.out_dir, &config.storage.export_file)?;
    println!("{}", path.display());
    Ok(())
}

pub(crate) fn run_clear(storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    let service = file_backed_service(&config);
    service.clear()?;
    println!("{}", cleared_message(config.locale));
    Ok(())
}

pub(crate) fn run_reset(storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    let service = file_backed_service(&config);
    let remaining = service.reset()?;
    println!("{} ({} stored)", cleared_message(config.locale), remaining.len());
    Ok(())
}

pub(crate) fn run_fields(storage: StorageArgs) -> Result<(), AppError> {
    let config = prepare(storage)?;
    for descriptor in FIELDS.iter() {
        println!(
            "{:<18} {:<13} {}",
            descriptor.field.key(),
            descriptor.kind.key(),
            descriptor.label(config.locale)
        );
    }
    Ok(())
}

fn build_draft(args: SubmitArgs) -> Result<ApplicationDraft, AppError> {
    let mut draft = match args.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            serde_json::from_str::<ApplicationDraft>(&raw)?
        }
        Some(path) => serde_json::from_str::<ApplicationDraft>(&std::fs::read_to_string(path)?)?,
        None => ApplicationDraft::new(),
    };

    for (key, value) in args.fields {
        let field = Field::from_key(&key)
            .ok_or_else(|| AppError::Input(format!("unknown field '{key}'")))?;
        draft.set(field, value);
    }

    Ok(draft)
}

fn submitted_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Application submitted successfully!",
        Locale::PtBr => "Candidatura enviada com sucesso!",
    }
}

fn cleared_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Applications cleared successfully!",
        Locale::PtBr => "Candidaturas limpas com sucesso!",
    }
}

use std::io;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use auditcsv::{
    classify, config, flatten::sample_events_by_group, Accumulator, Error, Options, ReaderSource,
    Reporter, SubRecord,
};

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run(options: &Options) -> Result<(), Error> {
    let files = options.input_files()?;
    let mut acc = Accumulator::new(&options.group_column);
    let mut samples: Vec<(String, Vec<SubRecord>)> = Vec::new();

    for path in files.iter() {
        info!(path = %path.display(), "processing audit file");

        let table = ReaderSource::from_path(path, options.encoding)?.read_table()?;

        acc.add_table(&table)?;

        if options.disp_event_split && options.event_naming.is_present(table.headers())? {
            for (group, events) in
                sample_events_by_group(&table, &options.group_column, &options.event_naming)?
            {
                if !samples.iter().any(|(g, _)| *g == group) {
                    samples.push((group, events));
                }
            }
        }
    }

    info!(
        files = acc.files().len(),
        groups = acc.grouped_totals().len(),
        "all files merged"
    );

    let global = classify(acc.totals());
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());

    if options.disp_all_flds {
        reporter.all_fields(acc.totals())?;
    }

    if options.disp_all_always {
        reporter.always(&global)?;
    }

    if let Some(format) = options.disp_action_always {
        reporter.action_always(acc.grouped_totals(), &global, format)?;
    }

    if let Some(format) = options.disp_action_sometimes {
        reporter.action_sometimes(acc.grouped_totals(), format)?;
    }

    if options.disp_event_split {
        reporter.event_split(&samples)?;
    }

    reporter.flush()
}

fn main() {
    let matches = config::app().get_matches();

    let options = match Options::from_matches(&matches) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    init_logging(options.verbosity);

    if let Err(e) = run(&options) {
        error!(error = %e, "run failed");
        process::exit(1);
    }
}

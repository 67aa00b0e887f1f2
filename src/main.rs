// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `junit-stream` binary: reads newline-delimited JSON events, prints a
//! progress log and writes a JUnit XML report.

use std::{
    fs,
    io::{self, BufRead, BufReader},
    process::ExitCode,
};

use junit_stream::{
    cli::Opts,
    event::Run,
    json,
    writer::{Basic, JUnit},
    Event, Stats as _, Writer as _, WriterExt as _,
};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(
                    tracing::level_filters::LevelFilter::WARN.into(),
                )
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parsed();

    let input: Box<dyn BufRead> = match &opts.input {
        Some(path) => match fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                tracing::error!("cannot open `{}`: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut basic = Basic::stdout();
    basic.apply_cli(opts.basic);
    let mut writer = basic.tee(JUnit::from_cli(&opts.junit));

    let mut finished = false;
    for ev in json::read_events(input) {
        match ev {
            Ok(ev) => {
                finished |= ev == Run::Finished;
                writer.handle_event(Event::new(ev));
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("skipping: {e}");
            }
            Err(e) => {
                tracing::error!("{e}");
                break;
            }
        }
    }
    if !finished {
        tracing::warn!("event stream ended without `finished` event");
        writer.handle_event(Event::new(Run::Finished));
    }

    if writer.execution_has_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use jiff::civil::Date;
use jiff::Zoned;

use crate::alphabet::{Alphabet, CharClass};
use crate::config::Config;
use crate::error::Error;
use crate::export;
use crate::models::{Batch, BatchOptions};
use crate::output;
use crate::sampler::{Sampler, DEFAULT_MAX_RETRIES, MAX_COUNT, MIN_COUNT};

const DEFAULT_COUNT: u32 = 100;

/// Batches at least this large get a progress bar; smaller ones finish
/// before a bar is worth drawing.
const PROGRESS_THRESHOLD: u32 = 1000;

#[allow(clippy::too_many_arguments)]
pub fn run(
    count: Option<u32>,
    expires: Option<Date>,
    no_uppercase: bool,
    no_digits: bool,
    exclude_similar: bool,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
    config: &Config,
) -> Result<()> {
    let count = count.or(config.generate.count).unwrap_or(DEFAULT_COUNT);
    if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
        return Err(Error::QuantityOutOfRange { requested: count }.into());
    }

    let exclude_similar =
        exclude_similar || config.generate.exclude_similar.unwrap_or(false);
    let classes = selected_classes(no_uppercase, no_digits);
    let alphabet = Alphabet::build(&classes, exclude_similar)?;

    let today = Zoned::now().date();
    let expires = expires.unwrap_or(today);
    if expires < today {
        return Err(Error::ExpiryInPast { date: expires }.into());
    }

    let max_retries = config.sampler.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
    let sampler = Sampler::new(&alphabet, max_retries);

    let progress = if count >= PROGRESS_THRESHOLD && !json && !quiet {
        let bar = ProgressBar::new(u64::from(count));
        bar.set_style(ProgressStyle::with_template(
            "{bar:40} {pos}/{len} keys",
        )?);
        Some(bar)
    } else {
        None
    };

    // Session set: owned by this run, cleared by construction.
    let mut issued = HashSet::with_capacity(count as usize);
    let mut keys = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match sampler.sample_one(&mut issued) {
            Ok(key) => {
                keys.push(key);
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }
            Err(e) => {
                if let Some(bar) = &progress {
                    bar.finish_and_clear();
                }
                return Err(e.into());
            }
        }
    }
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    let batch = Batch::new(
        keys,
        expires,
        BatchOptions {
            classes,
            exclude_similar,
        },
    );

    if let Some(ref path) = output {
        export::write_batch(path, &batch)?;
    }

    output::batch_generated(&batch, output.as_deref(), json, quiet)
}

fn selected_classes(no_uppercase: bool, no_digits: bool) -> Vec<CharClass> {
    let mut classes = Vec::new();
    if !no_uppercase {
        classes.push(CharClass::Uppercase);
    }
    if !no_digits {
        classes.push(CharClass::Digits);
    }
    classes
}

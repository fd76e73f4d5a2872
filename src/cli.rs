//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::broker_sim::BrokerSim;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{self as engine, BacktestConfig};
use crate::domain::config_validation::validate_backtest_config;
use crate::domain::error::StratscanError;
use crate::domain::scan::generate_signals;
use crate::domain::strategy::StrategySpec;
use crate::domain::timeframe::{resample, Timeframe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stratscan", about = "Rule-based strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest and write a report
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        strategy: Option<String>,
        #[arg(short, long)]
        timeframe: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print the signals a strategy produces, without simulating trades
    Signals {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        strategy: Option<String>,
        #[arg(short, long)]
        timeframe: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List registered strategies
    ListStrategies,
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show the stored data range for a symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            strategy,
            timeframe,
            data_dir,
            start,
            end,
            output,
            format,
        } => run_backtest(
            &RequestArgs {
                config: config.as_ref(),
                symbol: symbol.as_deref(),
                strategy: strategy.as_deref(),
                timeframe: timeframe.as_deref(),
                data_dir: data_dir.as_ref(),
                start,
                end,
            },
            output.as_ref(),
            format.as_deref(),
        ),
        Command::Signals {
            config,
            symbol,
            strategy,
            timeframe,
            data_dir,
            start,
            end,
        } => run_signals(&RequestArgs {
            config: config.as_ref(),
            symbol: symbol.as_deref(),
            strategy: strategy.as_deref(),
            timeframe: timeframe.as_deref(),
            data_dir: data_dir.as_ref(),
            start,
            end,
        }),
        Command::ListStrategies => run_list_strategies(),
        Command::ListSymbols { config, data_dir } => {
            run_list_symbols(config.as_ref(), data_dir.as_ref())
        }
        Command::Info {
            symbol,
            config,
            data_dir,
        } => run_info(&symbol, config.as_ref(), data_dir.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, StratscanError> {
    FileConfigAdapter::from_file(path).map_err(|e| StratscanError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Build a [`BacktestConfig`] from an optional config file, falling back to
/// defaults for anything missing.
pub fn build_backtest_config(config: Option<&dyn ConfigPort>) -> BacktestConfig {
    let defaults = BacktestConfig::default();
    let Some(c) = config else {
        return defaults;
    };

    BacktestConfig {
        initial_capital: c.get_double("backtest", "initial_capital", defaults.initial_capital),
        commission_pct: c.get_double("backtest", "commission_pct", defaults.commission_pct),
        position_size: c.get_double("backtest", "position_size", defaults.position_size),
        trend_period: usize::try_from(c.get_int(
            "backtest",
            "trend_period",
            defaults.trend_period as i64,
        ))
        .unwrap_or(0),
    }
}

/// Resolve the strategy key and apply any parameter overrides from config.
pub fn build_strategy(
    key_override: Option<&str>,
    config: Option<&dyn ConfigPort>,
) -> Result<StrategySpec, StratscanError> {
    let key = key_override
        .map(str::to_string)
        .or_else(|| config.and_then(|c| c.get_string("strategy", "key")))
        .unwrap_or_else(|| "ema_cross".to_string());

    let mut spec = StrategySpec::from_key(&key)?;

    if let Some(c) = config {
        let period = |key: &str, default: usize| {
            usize::try_from(c.get_int("strategy", key, default as i64)).unwrap_or(0)
        };

        spec = match spec {
            StrategySpec::EmaCross { fast, slow } => StrategySpec::EmaCross {
                fast: period("fast_period", fast),
                slow: period("slow_period", slow),
            },
            StrategySpec::GoldenCross { fast, slow } => StrategySpec::GoldenCross {
                fast: period("fast_period", fast),
                slow: period("slow_period", slow),
            },
            StrategySpec::Rsi {
                period: rsi_period,
                oversold,
                overbought,
            } => StrategySpec::Rsi {
                period: period("rsi_period", rsi_period),
                oversold: c.get_double("strategy", "oversold", oversold),
                overbought: c.get_double("strategy", "overbought", overbought),
            },
        };
    }

    spec.validate()?;
    Ok(spec)
}

pub fn resolve_symbol(
    symbol_override: Option<&str>,
    config: Option<&dyn ConfigPort>,
) -> Result<String, StratscanError> {
    symbol_override
        .map(str::to_string)
        .or_else(|| config.and_then(|c| c.get_string("backtest", "symbol")))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(StratscanError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        })
}

pub fn resolve_timeframe(
    timeframe_override: Option<&str>,
    config: Option<&dyn ConfigPort>,
) -> Result<Timeframe, StratscanError> {
    let key = timeframe_override
        .map(str::to_string)
        .or_else(|| config.and_then(|c| c.get_string("backtest", "timeframe")))
        .unwrap_or_else(|| "1d".to_string());
    Timeframe::from_key(&key)
}

pub fn resolve_data_dir(
    data_dir_override: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> PathBuf {
    data_dir_override
        .cloned()
        .or_else(|| {
            config
                .and_then(|c| c.get_string("data", "csv_dir"))
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("./data"))
}

pub fn resolve_date(
    date_override: Option<NaiveDate>,
    config: Option<&dyn ConfigPort>,
    key: &str,
) -> Result<Option<NaiveDate>, StratscanError> {
    if date_override.is_some() {
        return Ok(date_override);
    }
    match config.and_then(|c| c.get_string("backtest", key)) {
        Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| StratscanError::ConfigInvalid {
                section: "backtest".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }),
        None => Ok(None),
    }
}

struct BacktestRequest {
    symbol: String,
    spec: StrategySpec,
    timeframe: Timeframe,
    bars: Vec<crate::domain::ohlcv::OhlcvBar>,
    config: BacktestConfig,
}

/// Shared request inputs for `backtest` and `signals`.
struct RequestArgs<'a> {
    config: Option<&'a PathBuf>,
    symbol: Option<&'a str>,
    strategy: Option<&'a str>,
    timeframe: Option<&'a str>,
    data_dir: Option<&'a PathBuf>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

fn prepare_request(args: &RequestArgs<'_>) -> Result<BacktestRequest, StratscanError> {
    let adapter = match args.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            Some(load_config(path)?)
        }
        None => None,
    };
    let config_port = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let bt_config = build_backtest_config(config_port);
    validate_backtest_config(&bt_config)?;

    let spec = build_strategy(args.strategy, config_port)?;
    let symbol = resolve_symbol(args.symbol, config_port)?;
    let timeframe = resolve_timeframe(args.timeframe, config_port)?;
    let data_dir = resolve_data_dir(args.data_dir, config_port);
    let start = resolve_date(args.start, config_port, "start_date")?;
    let end = resolve_date(args.end, config_port, "end_date")?;

    info!(
        "fetching {} from {} ({})",
        symbol,
        data_dir.display(),
        timeframe.display_name()
    );
    let data_port = CsvAdapter::new(data_dir);
    let daily = data_port.fetch_ohlcv(&symbol, start, end)?;
    if daily.is_empty() {
        return Err(StratscanError::NoData {
            symbol: symbol.clone(),
        });
    }

    let bars = resample(&daily, timeframe);
    info!(
        "{}: {} daily bars, {} after resampling",
        symbol,
        daily.len(),
        bars.len()
    );

    Ok(BacktestRequest {
        symbol,
        spec,
        timeframe,
        bars,
        config: bt_config,
    })
}

fn run_backtest(
    args: &RequestArgs<'_>,
    output: Option<&PathBuf>,
    format: Option<&str>,
) -> ExitCode {
    let request = match prepare_request(args) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    let renderer: Box<dyn ReportPort> = match format.unwrap_or("text") {
        "text" => Box::new(TextReportAdapter),
        "json" => Box::new(JsonReportAdapter),
        other => {
            let e = StratscanError::ConfigInvalid {
                section: "report".into(),
                key: "format".into(),
                reason: format!("unknown format '{other}' (expected text or json)"),
            };
            error!("{e}");
            return (&e).into();
        }
    };

    info!(
        "running {} over {} {} bars",
        request.spec.display_name(),
        request.bars.len(),
        request.timeframe.display_name()
    );

    let report = match engine::run_backtest(
        &request.symbol,
        &request.bars,
        &request.spec,
        request.timeframe,
        &BrokerSim,
        &request.config,
    ) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    info!(
        "{}: net pnl {:+.2}, {} trades, win rate {:.1}%",
        report.symbol,
        report.summary.net_pnl,
        report.summary.total_trades,
        report.summary.win_rate * 100.0
    );

    let rendered = match renderer.render(&report) {
        Ok(text) => text,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                error!("failed to write report to {}: {e}", path.display());
                return ExitCode::from(1);
            }
            info!("report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    ExitCode::SUCCESS
}

fn run_signals(args: &RequestArgs<'_>) -> ExitCode {
    let request = match prepare_request(args) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    let signals = match generate_signals(&request.bars, &request.spec) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    if signals.is_empty() {
        info!(
            "{}: no signals from {}",
            request.symbol,
            request.spec.display_name()
        );
    }
    for signal in &signals {
        println!("{}  {:<4}  {:.2}", signal.date, signal.kind, signal.price);
    }

    ExitCode::SUCCESS
}

fn run_list_strategies() -> ExitCode {
    for spec in StrategySpec::all() {
        println!("{:<14} {}", spec.key(), spec.display_name());
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(e) => {
                error!("{e}");
                return (&e).into();
            }
        },
        None => None,
    };
    let config_port = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, config_port));
    match data_port.list_symbols() {
        Ok(symbols) => {
            if symbols.is_empty() {
                info!("no symbols found");
            }
            for symbol in &symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

fn run_info(symbol: &str, config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(e) => {
                error!("{e}");
                return (&e).into();
            }
        },
        None => None,
    };
    let config_port = adapter.as_ref().map(|a| a as &dyn ConfigPort);

    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, config_port));
    match data_port.data_range(symbol) {
        Ok(Some((first, last, count))) => {
            println!("{}: {} bars, {} to {}", symbol, count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            error!("{symbol}: no data found");
            let e = StratscanError::NoData {
                symbol: symbol.to_string(),
            };
            (&e).into()
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

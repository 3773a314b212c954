//! tcpopt - inspect TCP socket options on live connections
//!
//! Usage:
//!   tcpopt [OPTIONS] <COMMAND>
//!
//! Commands:
//!   probe [ADDR]   Connect to ADDR, apply configured options, report counters
//!   loopback       Cork/uncork self-test over 127.0.0.1
//!   support        List the operations this platform supports
//!
//! Options:
//!   -c, --config <FILE>    Configuration file path
//!   -l, --log-level        Log level (error, warn, info, debug, trace)
//!       --json             Print reports as JSON
//!   -h, --help             Print help

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use socket2::SockRef;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tcpopt::config::{Config, ProbeConfig};
use tcpopt::{ConnectionInfo, Operation, TcpOptionsExt, REGISTRY};

/// Log level for CLI
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace messages, including every socket syscall
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    fn from_config(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }
}

/// tcpopt - cross-platform TCP socket options
#[derive(Parser, Debug)]
#[command(name = "tcpopt")]
#[command(version)]
#[command(about = "Inspect cork state, queued bytes and kernel TCP statistics")]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to a peer, apply configured options and report counters
    Probe {
        /// Peer address (overrides probe.target)
        addr: Option<SocketAddr>,
    },
    /// Cork/uncork self-test over a loopback connection
    Loopback {
        /// Total bytes to send while corked
        #[arg(long, default_value_t = 1280)]
        bytes: usize,
        /// Number of writes the bytes are split into
        #[arg(long, default_value_t = 10)]
        chunks: usize,
    },
    /// List the operations this platform supports
    Support,
}

/// Counters sampled from one end of a connection
#[derive(Debug, Serialize)]
struct Report {
    local: SocketAddr,
    peer: SocketAddr,
    buffered: Option<usize>,
    available: Option<usize>,
    info: Option<ConnectionInfo>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let file_config = if let Some(config_path) = &args.config {
        match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // CLI overrides config, config overrides default (info)
    let log_level = args
        .log_level
        .unwrap_or_else(|| LogLevel::from_config(&file_config.log.level));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level.to_tracing_level())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = &args.config {
        info!("Loaded configuration from {:?}", path);
    }

    match args.command {
        Command::Probe { addr } => {
            let Some(target) = addr.or(file_config.probe.target) else {
                eprintln!("No target: pass ADDR or set probe.target");
                std::process::exit(2);
            };
            let report = probe(target, &file_config.probe).await?;
            print_report("probe", &report, args.json)?;
        }
        Command::Loopback { bytes, chunks } => {
            if chunks == 0 || bytes < chunks {
                eprintln!("--chunks must be between 1 and --bytes");
                std::process::exit(2);
            }
            let (client, server) = loopback(bytes, chunks, &file_config.probe).await?;
            print_report("client", &client, args.json)?;
            print_report("server", &server, args.json)?;
        }
        Command::Support => {
            for op in Operation::ALL {
                let descriptor = REGISTRY.resolve(op);
                if args.json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "operation": op.as_str(),
                            "supported": descriptor.is_supported(),
                        })
                    );
                } else {
                    println!("{:<20} {:?}", op, descriptor);
                }
            }
        }
    }

    Ok(())
}

/// Connect to `target`, apply the configured options and sample counters
async fn probe(target: SocketAddr, cfg: &ProbeConfig) -> Result<Report, Box<dyn std::error::Error>> {
    info!("Connecting to {}", target);
    let stream = tokio::time::timeout(cfg.connect_timeout, TcpStream::connect(target))
        .await
        .map_err(|_| format!("connect to {} timed out after {:?}", target, cfg.connect_timeout))??;

    apply_options(&stream, cfg)?;
    tokio::time::sleep(cfg.settle).await;

    sample(&stream)
}

/// Write `total` bytes in `chunks` corked writes to a local peer and verify
/// that all of them arrive once uncorked.
async fn loopback(
    total: usize,
    chunks: usize,
    cfg: &ProbeConfig,
) -> Result<(Report, Report), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    debug!("Loopback listener on {}", addr);

    let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
    let mut client = client?;
    let (mut server, _) = accepted?;
    SockRef::from(&server).set_recv_buffer_size(65535)?;
    apply_options(&client, cfg)?;

    let corked = match client.cork() {
        Ok(()) => true,
        Err(e) if e.is_unsupported() => {
            warn!("Cork unsupported on this platform, sending uncorked");
            false
        }
        Err(e) => return Err(e.into()),
    };

    let data = vec![0x5Au8; total];
    let chunk_size = total.div_ceil(chunks);
    for chunk in data.chunks(chunk_size) {
        client.write_all(chunk).await?;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    if corked {
        client.uncork()?;
    }

    tokio::time::sleep(cfg.settle).await;
    let server_report = sample(&server)?;

    let mut received = vec![0u8; total];
    tokio::time::timeout(Duration::from_secs(2), server.read_exact(&mut received))
        .await
        .map_err(|_| "peer did not receive all bytes")??;
    if received != data {
        return Err("peer received different bytes".into());
    }
    info!("Peer received all {} bytes", total);

    Ok((sample(&client)?, server_report))
}

fn apply_options(stream: &TcpStream, cfg: &ProbeConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(opts) = cfg.buffer_options() {
        stream.set_buffer_options(&opts)?;
        info!("Unsent threshold set to {} bytes", opts.unsent_threshold);
    }

    let keepalive = cfg.keepalive_idle.is_some()
        || cfg.keepalive_interval.is_some()
        || cfg.keepalive_probes.is_some();
    if keepalive {
        SockRef::from(stream).set_keepalive(true)?;
    }
    if let Some(idle) = cfg.keepalive_idle {
        stream.set_keepalive_idle(idle)?;
    }
    if let Some(interval) = cfg.keepalive_interval {
        stream.set_keepalive_interval(interval)?;
    }
    if let Some(probes) = cfg.keepalive_probes {
        stream.set_keepalive_probes(probes)?;
    }

    Ok(())
}

/// Sample every counter; unsupported ones are reported as absent
fn sample(stream: &TcpStream) -> Result<Report, Box<dyn std::error::Error>> {
    Ok(Report {
        local: stream.local_addr()?,
        peer: stream.peer_addr()?,
        buffered: optional(stream.buffered())?,
        available: optional(stream.available())?,
        info: optional(stream.connection_info())?,
    })
}

fn optional<T>(result: tcpopt::Result<T>) -> tcpopt::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_unsupported() => {
            debug!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn print_report(label: &str, report: &Report, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ label: report }))?);
        return Ok(());
    }

    println!("[{}] {} -> {}", label, report.local, report.peer);
    println!("  buffered:  {}", fmt_count(report.buffered));
    println!("  available: {}", fmt_count(report.available));
    match &report.info {
        Some(ConnectionInfo::Linux(i)) => {
            println!(
                "  state={} ca_state={:?} rtt={:?} rttvar={:?} cwnd={} retrans={}",
                i.state,
                i.congestion_state(),
                i.rtt(),
                i.rtt_var(),
                i.snd_cwnd,
                i.total_retrans
            );
            println!(
                "  bytes_acked={} bytes_received={} segs_out={} segs_in={}",
                i.bytes_acked, i.bytes_received, i.segs_out, i.segs_in
            );
        }
        Some(ConnectionInfo::Darwin(i)) => {
            println!(
                "  state={} srtt={:?} rttvar={:?} cwnd={} sndbuf_bytes={}",
                i.state,
                i.rtt(),
                i.rtt_var(),
                i.snd_cwnd,
                i.snd_sbbytes
            );
            println!(
                "  txbytes={} rxbytes={} txretransmitpackets={}",
                i.txbytes, i.rxbytes, i.txretransmitpackets
            );
        }
        None => println!("  connection info: unsupported"),
    }
    Ok(())
}

fn fmt_count(n: Option<usize>) -> String {
    n.map_or_else(|| "unsupported".to_string(), |n| n.to_string())
}

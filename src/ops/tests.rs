//! Façade tests that need no live connection

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::registry::stub;

/// A descriptor no OS will accept; any syscall made with it fails.
#[cfg(not(windows))]
const INVALID: SocketHandle = -1;
#[cfg(windows)]
const INVALID: SocketHandle = SocketHandle::MAX;

fn assert_unsupported<T: std::fmt::Debug>(result: Result<T>, op: Operation) {
    match result {
        Err(Error::Unsupported(got)) => assert_eq!(got, op),
        other => panic!("expected Unsupported({}), got {:?}", op, other),
    }
}

#[test]
fn test_stub_table_never_reaches_the_os() {
    let reg = &stub::TABLE;
    // With an invalid handle any attempted syscall would surface as Error::Os.
    assert_unsupported(set_cork(reg, INVALID, true), Operation::Cork);
    assert_unsupported(set_cork(reg, INVALID, false), Operation::Cork);
    assert_unsupported(
        query_count(reg, INVALID, Operation::BufferedCount),
        Operation::BufferedCount,
    );
    assert_unsupported(
        query_count(reg, INVALID, Operation::AvailableCount),
        Operation::AvailableCount,
    );
    assert_unsupported(
        apply_buffer_options(
            reg,
            INVALID,
            &BufferOptions {
                unsent_threshold: 1024,
            },
        ),
        Operation::BufferOptions,
    );
    assert_unsupported(query_info(reg, INVALID), Operation::ConnectionInfo);
    for op in [
        Operation::KeepAliveIdle,
        Operation::KeepAliveInterval,
        Operation::KeepAliveProbes,
    ] {
        assert_unsupported(set_int(reg, INVALID, op, 1), op);
    }
}

#[test]
fn test_threshold_must_fit_c_int() {
    let opts = BufferOptions {
        unsent_threshold: u32::MAX,
    };
    // Validation happens before the registry is consulted.
    assert!(matches!(
        apply_buffer_options(&stub::TABLE, INVALID, &opts),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_mismatched_descriptor_kind_is_unsupported() {
    let mut reg = stub::TABLE;
    reg.cork = Descriptor::Control { request: 1 };
    reg.buffered = Descriptor::Record {
        level: 6,
        name: 11,
        layout: crate::info::RecordLayout::LinuxTcpInfo,
    };
    reg.connection_info = Descriptor::Int { level: 6, name: 3 };

    assert_unsupported(set_cork(&reg, INVALID, true), Operation::Cork);
    assert_unsupported(
        query_count(&reg, INVALID, Operation::BufferedCount),
        Operation::BufferedCount,
    );
    assert_unsupported(query_info(&reg, INVALID), Operation::ConnectionInfo);
}

#[test]
fn test_whole_seconds_rounds_up() {
    assert_eq!(whole_seconds(Duration::from_secs(30)).unwrap(), 30);
    assert_eq!(whole_seconds(Duration::from_millis(1500)).unwrap(), 2);
    assert_eq!(whole_seconds(Duration::from_nanos(1)).unwrap(), 1);
    assert_eq!(whole_seconds(Duration::ZERO).unwrap(), 0);
    assert!(matches!(
        whole_seconds(Duration::from_secs(u64::MAX)),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_negative_count_reads_as_zero() {
    assert_eq!(non_negative(Operation::AvailableCount, -4096), 0);
    assert_eq!(non_negative(Operation::BufferedCount, 0), 0);
    assert_eq!(non_negative(Operation::BufferedCount, 15), 15);
}

#[test]
fn test_decode_int() {
    assert_eq!(decode_int(&42i32.to_ne_bytes()).unwrap(), 42);
    assert!(matches!(
        decode_int(&[1, 2]),
        Err(Error::Decode {
            what: "int",
            expected: 4,
            actual: 2
        })
    ));
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::Unsupported(Operation::Cork).to_string(),
        "cork is not supported on this platform"
    );
    assert!(Error::Unsupported(Operation::Cork).is_unsupported());
    assert_eq!(Error::Unsupported(Operation::Cork).raw_os_error(), None);
}

#[cfg(unix)]
#[test]
fn test_os_errors_pass_through_verbatim() {
    let cork = REGISTRY.resolve(Operation::Cork);
    if !cork.is_supported() {
        return;
    }
    let err = set_cork(&REGISTRY, INVALID, true).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    assert!(std::error::Error::source(&err).is_some());
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn test_short_record_from_kernel_is_decode_error() {
    use std::os::unix::io::AsRawFd;

    use crate::info::RecordLayout;

    let ln = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let client = std::net::TcpStream::connect(ln.local_addr().unwrap()).unwrap();
    let _server = ln.accept().unwrap();

    // SO_SNDBUF answers with a 4-byte int, far short of a tcp_info record.
    let mut reg = REGISTRY;
    reg.connection_info = Descriptor::Record {
        level: libc::SOL_SOCKET,
        name: libc::SO_SNDBUF,
        layout: RecordLayout::LinuxTcpInfo,
    };

    match query_info(&reg, client.as_raw_fd()) {
        Err(Error::Decode {
            what,
            expected,
            actual,
        }) => {
            assert_eq!(what, "tcp_info");
            assert_eq!(expected, 144);
            assert_eq!(actual, 4);
        }
        other => panic!("expected a decode error, got {:?}", other),
    }
}

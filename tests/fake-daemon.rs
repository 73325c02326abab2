use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use gpsd_watch::{Connector, GpsdError, Poller, Stopped, TimeFormat, Timings};

/// What a gpsd with a u-blox receiver would say after `?WATCH`.
///
const REPORTS: &[&str] = &[
    r#"{"class":"VERSION","release":"3.25","rev":"3.25","proto_major":3,"proto_minor":15}"#,
    r#"{"class":"DEVICES","devices":[{"class":"DEVICE","path":"/dev/ttyACM0","driver":"u-blox"}]}"#,
    r#"{"class":"WATCH","enable":true,"json":true,"nmea":false}"#,
    r#"{"class":"SKY","device":"/dev/ttyACM0","hdop":0.92,"vdop":1.43,"pdop":1.7,"satellites":[{"PRN":2,"used":true},{"PRN":5,"used":true},{"PRN":12,"used":false}]}"#,
    r#"{"class":"TPV","device":"/dev/ttyACM0","mode":1,"time":"2023-08-02T13:45:06.000Z"}"#,
    r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"status":2,"time":"2023-08-02T13:45:07.000Z","lat":46.2044,"lon":6.1432}"#,
    r#"{"class":"TPV","device":"/dev/ttyACM0","mode":1}"#,
    r#"{"class":"TPV","device":"/dev/ttyACM0","mode":2,"time":"2023-08-02T13:45:09.000Z","lat":46.2045,"lon":6.1433}"#,
];

fn timings(initial_wait: Duration) -> Timings {
    Timings {
        initial_wait,
        wait: Duration::from_secs(5),
        retry: Duration::ZERO,
    }
}

#[test]
fn test_stream_fixes() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let daemon = thread::spawn(move || {
        let (conn, _) = listener.accept().unwrap();
        let mut conn = BufReader::new(conn);

        let mut cmd = String::new();
        conn.read_line(&mut cmd).unwrap();

        let mut reports = REPORTS.join("\n");
        reports.push('\n');
        conn.get_mut().write_all(reports.as_bytes()).unwrap();
        cmd
    });

    let mut gpsd = Connector::new("127.0.0.1", port);
    assert!(gpsd.connect());

    let session = gpsd.session().unwrap();
    let poller = Poller::new(TimeFormat::Iso8601).with_timings(timings(Duration::from_secs(5)));
    let mut out = Vec::new();
    let stopped = poller.poll(session, &mut out).unwrap();

    assert_eq!("?WATCH={\"enable\":true,\"json\":true};\n", daemon.join().unwrap());
    assert!(matches!(stopped, Stopped::ReadError(_)));
    assert_eq!(
        "2,3,2023-08-02T13:45:07Z,46.20440000,6.14320000,0.92000000,1.43000000,1.70000000,3,2\n\
         1,2,2023-08-02T13:45:09Z,46.20450000,6.14330000,0.92000000,1.43000000,1.70000000,3,2\n",
        String::from_utf8(out).unwrap()
    );

    let session = gpsd.session().unwrap();
    assert_eq!(Some("3.25"), session.release());
    assert_eq!(REPORTS.len() as u64, session.reports());
}

#[test]
fn test_daemon_error_is_not_fatal() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let daemon = thread::spawn(move || {
        let (conn, _) = listener.accept().unwrap();
        let mut conn = BufReader::new(conn);

        let mut cmd = String::new();
        conn.read_line(&mut cmd).unwrap();

        let reports = [
            r#"{"class":"ERROR","message":"Can't open /dev/ttyUSB9."}"#,
            r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2023-08-02T13:45:07.000Z","lat":46.2044,"lon":6.1432}"#,
            r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2023-08-02T13:45:08.000Z","lat":46.2045,"lon":6.1433}"#,
            r#"{"class":"TPV","device":"/dev/ttyACM0","mode":3,"time":"2023-08-02T13:45:09.000Z","lat":46.2046,"lon":6.1434}"#,
        ];
        let mut reports = reports.join("\n");
        reports.push('\n');
        conn.get_mut().write_all(reports.as_bytes()).unwrap();
    });

    let mut gpsd = Connector::new("127.0.0.1", port);
    assert!(gpsd.connect());

    let session = gpsd.session().unwrap();
    let poller = Poller::new(TimeFormat::Iso8601).with_timings(timings(Duration::from_secs(5)));
    let mut out = Vec::new();
    let stopped = poller.poll(session, &mut out).unwrap();
    daemon.join().unwrap();

    assert!(matches!(stopped, Stopped::ReadError(GpsdError::Closed)));
    assert_eq!(
        "1,3,2023-08-02T13:45:07Z,46.20440000,6.14320000,nan,nan,nan,0,0\n\
         1,3,2023-08-02T13:45:09Z,46.20460000,6.14340000,nan,nan,nan,0,0\n",
        String::from_utf8(out).unwrap()
    );
    assert_eq!(
        Some("Can't open /dev/ttyUSB9."),
        gpsd.session().unwrap().last_error()
    );
}

#[test]
fn test_no_initial_data() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (done_tx, done_rx) = channel::<()>();

    let daemon = thread::spawn(move || {
        let (conn, _) = listener.accept().unwrap();
        let _ = done_rx.recv();
        drop(conn);
    });

    let mut gpsd = Connector::new("127.0.0.1", port);
    assert!(gpsd.connect());

    let session = gpsd.session().unwrap();
    let poller = Poller::new(TimeFormat::Unix).with_timings(timings(Duration::from_millis(100)));
    let mut out = Vec::new();
    let stopped = poller.poll(session, &mut out).unwrap();

    assert!(matches!(stopped, Stopped::NoData));
    assert!(out.is_empty());

    done_tx.send(()).unwrap();
    daemon.join().unwrap();
}

#[test]
fn test_daemon_refuses() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut gpsd = Connector::new("127.0.0.1", port);
    assert!(!gpsd.connect());
    assert!(gpsd.session().is_none());
}

//! 多个连接在乱序网络上的SACK跟踪测试
//! SACK tracking for several connections over a reordering network

pub mod common;

use common::harness::init_tracing;
use futures::future::join_all;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::sync::Arc;
use tcp_sack::{FixedList, SackTable};
use tokio::sync::mpsc;
use tracing::{debug, info};

type Table = SackTable<u32, FixedList<4>>;

const MSS: u32 = 536;
const SEGMENTS: u32 = 96;

#[derive(Debug, Clone, Copy)]
struct Segment {
    seq: u32,
    len: u32,
}

/// The part of a TCP receive path that talks to the SACK table.
struct Receiver {
    table: Arc<Table>,
    conn: u32,
    isn: u32,
    rcv_nxt: u32,
    /// Segments the list had no room for; the peer will send them again.
    retransmit: Vec<Segment>,
}

impl Receiver {
    fn new(table: Arc<Table>, conn: u32, isn: u32) -> Self {
        assert!(table.open(conn));
        Self {
            table,
            conn,
            isn,
            rcv_nxt: isn,
            retransmit: Vec::new(),
        }
    }

    fn on_segment(&mut self, segment: Segment) {
        if segment.seq == self.rcv_nxt {
            self.rcv_nxt = self.rcv_nxt.wrapping_add(segment.len);
            // A block starting at the new edge is retired whole and becomes
            // part of the in-order data.
            let res = self.table.new_valid_ack(&self.conn, self.rcv_nxt).unwrap();
            self.rcv_nxt = self.rcv_nxt.wrapping_add(res.bytes);
            return;
        }

        let res = self
            .table
            .recv_out_of_order(&self.conn, segment.seq, segment.len)
            .unwrap();
        if res.bytes == 0 {
            debug!(conn = self.conn, seq = segment.seq, "Segment dropped, awaiting retransmission");
            self.retransmit.push(segment);
        }
    }

    fn drain_retransmissions(&mut self) {
        while !self.retransmit.is_empty() {
            let isn = self.isn;
            self.retransmit.sort_by_key(|segment| segment.seq.wrapping_sub(isn));
            for segment in std::mem::take(&mut self.retransmit) {
                self.on_segment(segment);
            }
        }
    }
}

/// Sends the segments of one stream, shuffled within small windows.
async fn network(isn: u32, seed: u64, tx: mpsc::Sender<Segment>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut segments: Vec<Segment> = (0..SEGMENTS)
        .map(|i| Segment {
            seq: isn.wrapping_add(i * MSS),
            len: MSS,
        })
        .collect();
    for window in segments.chunks_mut(6) {
        window.shuffle(&mut rng);
    }

    for segment in segments {
        if tx.send(segment).await.is_err() {
            return;
        }
        tokio::task::yield_now().await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reordered_streams_are_fully_acknowledged() {
    init_tracing();
    let table = Arc::new(Table::new());
    let isns = [0u32, 1_000_000, u32::MAX - 10 * MSS, 0x8000_0000];

    let receivers = isns.iter().enumerate().map(|(conn, &isn)| {
        let table = table.clone();
        let conn = conn as u32;
        async move {
            let (tx, mut rx) = mpsc::channel(8);
            let sender = tokio::spawn(network(isn, u64::from(conn), tx));

            let mut receiver = Receiver::new(table, conn, isn);
            while let Some(segment) = rx.recv().await {
                receiver.on_segment(segment);
            }
            receiver.drain_retransmissions();
            sender.await.unwrap();
            (conn, isn, receiver.rcv_nxt)
        }
    });

    let results = join_all(receivers.map(tokio::spawn)).await;

    for result in results {
        let (conn, isn, rcv_nxt) = result.unwrap();
        assert_eq!(rcv_nxt, isn.wrapping_add(SEGMENTS * MSS));
        assert_eq!(table.inspect(&conn, |sack| sack.is_empty()), Some(true));

        let stats = table.close(&conn).unwrap();
        info!(conn, %stats, "Connection finished");
        assert_eq!(stats.bytes_sacked, stats.bytes_retired);
        assert_eq!(stats.duplicate_bytes, 0);
    }
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_connections_do_not_share_blocks() {
    init_tracing();
    let table = Arc::new(Table::new());
    let mut first = Receiver::new(table.clone(), 1, 5000);
    let mut second = Receiver::new(table.clone(), 2, 5000);

    first.on_segment(Segment { seq: 5500, len: 500 });
    second.on_segment(Segment { seq: 6500, len: 500 });

    // Filling the first connection's hole must not touch the second one.
    first.on_segment(Segment { seq: 5000, len: 500 });
    assert_eq!(first.rcv_nxt, 6000);
    assert_eq!(second.rcv_nxt, 5000);
    assert_eq!(table.inspect(&2, |sack| sack.len()), Some(1));
    assert_eq!(table.inspect(&1, |sack| sack.len()), Some(0));
}

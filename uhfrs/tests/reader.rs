//! Reader behaviour against a scripted transport

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;
use pretty_assertions::assert_eq;

use uhfrs::{Command, CommandEncoder, EpcFormat, Error, Reader, ReaderConfig, ReturnCode};
use uhfrs_core::constants::{FrequencyRegion, MemoryBank};
use uhfrs_transport::Transport;

mock! {
    pub Link {}

    #[async_trait]
    impl Transport for Link {
        async fn connect(&mut self) -> uhfrs_transport::Result<()>;
        async fn disconnect(&mut self) -> uhfrs_transport::Result<()>;
        fn is_connected(&self) -> bool;
        async fn send(&mut self, data: &[u8]) -> uhfrs_transport::Result<()>;
        async fn receive(&mut self, wait: Duration) -> uhfrs_transport::Result<Bytes>;
        fn peer(&self) -> String;
    }
}

/// Reply frame from reader address 0x01
fn reply(command: Command, payload: &[u8]) -> Vec<u8> {
    CommandEncoder::new(0x01)
        .build_with_payload(command, payload)
        .to_vec()
}

/// A connected link that returns `chunks` in order, then times out
fn link(chunks: Vec<Vec<u8>>) -> (MockLink, Arc<Mutex<Vec<Vec<u8>>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let mut chunks: VecDeque<Bytes> = chunks.into_iter().map(Bytes::from).collect();

    let mut mock = MockLink::new();
    mock.expect_is_connected().return_const(true);
    mock.expect_peer().return_const("mock:4001".to_string());
    mock.expect_connect().returning(|| Ok(()));
    mock.expect_disconnect().returning(|| Ok(()));

    let log = Arc::clone(&sent);
    mock.expect_send().returning(move |data| {
        log.lock().unwrap().push(data.to_vec());
        Ok(())
    });
    mock.expect_receive()
        .returning(move |_| chunks.pop_front().ok_or(uhfrs_transport::Error::ReadTimeout));

    (mock, sent)
}

fn reader(mock: MockLink, config: ReaderConfig) -> Reader {
    Reader::with_transport(Box::new(mock), config.with_timeout(Duration::from_millis(500))).unwrap()
}

#[tokio::test]
async fn test_execute_skips_bad_frames_and_other_replies() {
    let mut corrupt = reply(Command::GetFirmwareVersion, &[0x09, 0x09]);
    let last = corrupt.len() - 1;
    corrupt[last] ^= 0xFF;

    let answer = reply(Command::GetFirmwareVersion, &[0x08, 0x01]);
    let (head, tail) = answer.split_at(4);

    let mut first = corrupt;
    first.extend(reply(Command::GetWorkingAntenna, &[0x00]));
    first.extend_from_slice(head);

    let (mock, sent) = link(vec![first, tail.to_vec()]);
    let mut reader = reader(mock, ReaderConfig::default());
    reader.connect().await.unwrap();

    assert_eq!(reader.firmware_version().await.unwrap(), (8, 1));
    assert_eq!(
        sent.lock().unwrap().as_slice(),
        &[vec![0xA0, 0x03, 0x01, 0x72, 0xEA]]
    );
}

#[tokio::test]
async fn test_execute_times_out() {
    let (mock, _) = link(vec![]);
    let mut reader = reader(mock, ReaderConfig::default());

    let err = reader.firmware_version().await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn test_status_success_and_failure() {
    let (mock, sent) = link(vec![
        reply(Command::SetWorkingAntenna, &[0x10]),
        reply(Command::SetFrequencyRegion, &[0x11]),
    ]);
    let mut reader = reader(mock, ReaderConfig::default());

    reader.set_working_antenna(0x02).await.unwrap();

    let err = reader
        .set_frequency_region(FrequencyRegion::Etsi, 0, 6)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Device(ReturnCode::CommandFail)));

    let sent = sent.lock().unwrap();
    assert_eq!(sent[0][3], 0x74);
    assert_eq!(&sent[0][4..5], &[0x02]);
    assert_eq!(sent[1][3], 0x78);
    assert_eq!(&sent[1][4..7], &[0x02, 0x00, 0x06]);
}

#[tokio::test]
async fn test_reader_info_without_identifier() {
    let (mock, _) = link(vec![
        reply(Command::GetFirmwareVersion, &[0x01, 0x06]),
        reply(Command::GetReaderIdentifier, &[0x11]),
    ]);
    let mut reader = reader(mock, ReaderConfig::default().with_address(0x01));

    let info = reader.reader_info().await.unwrap();
    assert_eq!(info.to_string(), "Reader[0x01, FW: 1.6]");
}

#[tokio::test]
async fn test_inventory_collects_tags_until_total() {
    let mut chunk = reply(Command::RealtimeInventory, &[0x00, 0x30, 0x00, 0x41, 0x42, 0x50]);
    chunk.extend(reply(Command::RealtimeInventory, &[0x81, 0x30, 0x00, 0x5A, 0x09, 0xC8]));
    chunk.extend(reply(Command::RealtimeInventory, &[0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x02]));

    let (mock, sent) = link(vec![chunk]);
    let mut reader = reader(mock, ReaderConfig::default().with_epc_format(EpcFormat::Ascii));

    let tags = reader.inventory(1).await.unwrap();
    assert_eq!(tags.len(), 2);

    assert_eq!(tags[0].epc, "30004142");
    assert_eq!(tags[0].decoded.as_deref(), Some("AB"));
    assert_eq!(tags[0].antenna, 1);
    assert_eq!(tags[0].rssi, 0x50 - 129);

    assert_eq!(tags[1].epc, "30005A09");
    assert_eq!(tags[1].decoded.as_deref(), Some("Z"));
    assert_eq!(tags[1].antenna, 6);
    assert_eq!(tags[1].rssi, 0x48 - 129);

    assert_eq!(sent.lock().unwrap()[0], vec![0xA0, 0x04, 0x01, 0x89, 0x01, 0xD1]);
}

#[tokio::test]
async fn test_inventory_reports_device_error() {
    let (mock, _) = link(vec![reply(Command::RealtimeInventory, &[0x22])]);
    let mut reader = reader(mock, ReaderConfig::default());

    let err = reader.inventory(1).await.unwrap_err();
    assert!(matches!(err, Error::Device(code) if code.code() == 0x22));
}

#[tokio::test]
async fn test_inventory_decodes_sgtin_without_pc() {
    let payload = [
        0x00, 0x30, 0x00, 0x30, 0x74, 0x25, 0x7B, 0xF7, 0x19, 0x4E, 0x40, 0x00, 0x00, 0x1A, 0x85,
        0x60,
    ];

    let mut chunk = reply(Command::RealtimeInventory, &payload);
    chunk.extend(reply(Command::RealtimeInventory, &[0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01]));

    let (mock, _) = link(vec![chunk]);
    let mut reader = reader(mock, ReaderConfig::default().with_epc_format(EpcFormat::Ean));

    let tags = reader.inventory(1).await.unwrap();
    assert_eq!(tags[0].epc, "30003074257BF7194E4000001A85");
    assert_eq!(tags[0].decoded.as_deref(), Some("80614141123458-6789"));
}

#[tokio::test]
async fn test_read_tag_collects_every_tag() {
    let first = [
        0x00, 0x02, 0x0A, 0x30, 0x00, 0xE2, 0x00, 0x11, 0x22, 0xAB, 0xCD, 0x12, 0x34, 0x02, 0x00,
        0x01,
    ];
    let second = [
        0x00, 0x02, 0x0A, 0x30, 0x00, 0xE2, 0x00, 0x33, 0x44, 0xAB, 0xCD, 0x56, 0x78, 0x02, 0x01,
        0x01,
    ];
    let (mock, sent) = link(vec![
        reply(Command::ReadTag, &first),
        reply(Command::ReadTag, &second),
    ]);
    let mut reader = reader(mock, ReaderConfig::default());

    let tags = reader.read_tag(MemoryBank::User, 0, 1).await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].pc_epc_hex(), "3000E2001122");
    assert_eq!(&tags[0].data[..], &[0x12, 0x34]);
    assert_eq!(tags[1].epc_hex(), "E2003344");
    assert_eq!(tags[1].antenna, 2);

    assert_eq!(&sent.lock().unwrap()[0][3..7], &[0x81, 0x03, 0x00, 0x01]);
}

#[tokio::test]
async fn test_write_ascii_epc() {
    // tag count 1, data len 8 (PC + 4 EPC bytes + CRC), status 0x10
    let written = [
        0x00, 0x01, 0x08, 0x30, 0x00, 0x41, 0x42, 0x43, 0x00, 0xAB, 0xCD, 0x10, 0x00, 0x01,
    ];
    let (mock, sent) = link(vec![reply(Command::WriteTag, &written)]);
    let mut reader = reader(mock, ReaderConfig::default());

    let tags = reader.write_ascii_epc("ABC").await.unwrap();
    assert_eq!(tags[0].status, Some(ReturnCode::Success));

    // password, EPC bank, word 1, 3 words: PC 0x1000 then "ABC\0"
    let sent = sent.lock().unwrap();
    let frame = &sent[0];
    assert_eq!(
        &frame[3..frame.len() - 1],
        &[0x82, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x03, 0x10, 0x00, 0x41, 0x42, 0x43, 0x00]
    );
}

#[tokio::test]
async fn test_write_tag_rejects_odd_data() {
    let (mock, sent) = link(vec![]);
    let mut reader = reader(mock, ReaderConfig::default());

    let err = reader
        .write_tag(&[0; 4], MemoryBank::User, 0, &[0x01, 0x02, 0x03])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_write_tag_reports_failed_status() {
    let written = [0x00, 0x01, 0x08, 0x30, 0x00, 0x41, 0x42, 0x00, 0x00, 0xAB, 0xCD, 0x34, 0x00, 0x01];
    let (mock, _) = link(vec![reply(Command::WriteTag, &written)]);
    let mut reader = reader(mock, ReaderConfig::default());

    let err = reader
        .write_tag(&[0; 4], MemoryBank::User, 0, &[0x01, 0x02])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Device(code) if code.code() == 0x34));
}

#[tokio::test]
async fn test_poll_returns_messages_in_order() {
    let stream = [
        reply(Command::SetWorkingAntenna, &[0x10]),
        reply(Command::GetWorkingAntenna, &[0x03]),
    ]
    .concat();
    let (first, second) = stream.split_at(9);

    let (mock, _) = link(vec![first.to_vec(), second.to_vec()]);
    let mut reader = reader(mock, ReaderConfig::default());

    let mut messages = reader.poll().await.unwrap();
    messages.extend(reader.poll().await.unwrap());

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].command, 0x74);
    assert_eq!(messages[1].command, 0x75);
    assert_eq!(&messages[1].payload[..], &[0x03]);
}

#[tokio::test]
async fn test_connect_discards_partial_frame() {
    let answer = reply(Command::GetWorkingAntenna, &[0x01]);
    let (mock, _) = link(vec![vec![0xA0, 0x04, 0x01], answer]);
    let mut reader = reader(mock, ReaderConfig::default());

    assert!(reader.poll().await.unwrap().is_empty());

    // Reconnecting drops the three carried bytes
    reader.connect().await.unwrap();
    assert_eq!(reader.working_antenna().await.unwrap(), 0x01);
}

#[tokio::test]
async fn test_reset_does_not_wait() {
    let (mock, sent) = link(vec![]);
    let mut reader = reader(mock, ReaderConfig::default());

    reader.reset().await.unwrap();
    assert_eq!(
        sent.lock().unwrap().as_slice(),
        &[vec![0xA0, 0x03, 0x01, 0x70, 0xEC]]
    );
}

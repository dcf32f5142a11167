//! End-to-end conversation flow tests with mocked collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use regex::Regex;

use astopup::core::error::AppResult;
use astopup::freefire::{PlayerProfile, ProfileApi};
use astopup::orders::{flow, ConversationEngine, ReceiptSink};

struct StaticProfiles(HashMap<String, String>);

#[async_trait]
impl ProfileApi for StaticProfiles {
    async fn fetch_player(&self, _uid: &str) -> AppResult<PlayerProfile> {
        Ok(PlayerProfile::default())
    }

    async fn nickname(&self, uid: &str) -> AppResult<Option<String>> {
        Ok(self.0.get(uid).cloned())
    }
}

#[derive(Default)]
struct CapturingSink(Mutex<Vec<String>>);

#[async_trait]
impl ReceiptSink for CapturingSink {
    async fn publish(&self, text: &str) -> AppResult<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn engine() -> (ConversationEngine, Arc<CapturingSink>) {
    let mut known = HashMap::new();
    known.insert("123456".to_string(), "PlayerOne".to_string());
    let sink = Arc::new(CapturingSink::default());
    let engine = ConversationEngine::new(
        Arc::new(StaticProfiles(known)),
        sink.clone(),
        "https://shop.example/topup",
    );
    (engine, sink)
}

const OWNER: i64 = 1;
const CHAT: i64 = 10;

async fn turn(engine: &ConversationEngine, text: &str) -> String {
    engine
        .handle_turn(OWNER, CHAT, text, true)
        .await
        .unwrap_or_else(|| panic!("expected a reply to {:?}", text))
}

#[tokio::test]
async fn general_order_end_to_end() {
    let (engine, sink) = engine();

    let prompt = engine.start_general_order(OWNER, CHAT).await;
    assert_eq!(prompt, "**Enter UID:**");

    assert_eq!(
        turn(&engine, "123456").await,
        "**PlayerOne** - Enter order detail and method:"
    );
    assert_eq!(turn(&engine, "PUBG UC x1").await, "**Enter Bkash Trx ID:**");
    assert_eq!(turn(&engine, "TRX999").await, "**Enter package name:**");
    assert_eq!(
        turn(&engine, "Weekly Pass").await,
        "**Enter Paid/profit amount:**"
    );
    assert_eq!(
        turn(&engine, "500").await,
        "**Order ID:** (or reply /gen to auto-generate)"
    );
    assert_eq!(turn(&engine, "/gen").await, flow::NOTICE_ORDER_PROCESSED);

    assert!(!engine.has_conversation(OWNER).await);

    let receipts = sink.0.lock().unwrap();
    assert_eq!(receipts.len(), 1);
    let receipt = &receipts[0];
    assert!(receipt.contains("◆ UID             : 123456"));
    assert!(receipt.contains("◆ Order Details   : PUBG UC x1"));
    assert!(receipt.contains("◆ bKash Trx ID    : TRX999"));
    assert!(receipt.contains("◆ Package Name    : Weekly Pass"));
    assert!(receipt.contains("◆ Paid/Profit     : 500"));
    assert!(!receipt.contains("UniPin"));

    let order_id = Regex::new(r"◆ Order ID        : ([A-Z0-9]{8})\n").unwrap();
    assert!(order_id.is_match(receipt), "receipt was: {}", receipt);
}

#[tokio::test]
async fn topup_end_to_end_with_manual_order_id() {
    let (engine, sink) = engine();

    let prompt = engine.start_topup(OWNER, CHAT, "123456", "PlayerOne").await;
    assert!(prompt.starts_with("**PlayerOne** - If the player name is ok"));
    assert!(prompt.contains("[Click here](https://shop.example/topup)"));

    assert_eq!(turn(&engine, "y").await, "**Enter Unipin code:**");
    assert_eq!(turn(&engine, "UP-777").await, "**Enter Bkash Trx ID:**");
    assert_eq!(turn(&engine, "TRX999").await, "**Enter the package name:**");
    assert_eq!(
        turn(&engine, "Weekly Pass").await,
        "**Enter Profit/paid amount:**"
    );
    assert_eq!(
        turn(&engine, "500").await,
        "**Order ID:** (or reply /gen to auto-generate)"
    );
    assert_eq!(turn(&engine, "FF-2024-01").await, "**All ok? Reply 'y' or 'n'**");
    assert_eq!(turn(&engine, "y").await, flow::NOTICE_ORDER_PROCESSED);

    assert!(!engine.has_conversation(OWNER).await);

    let receipts = sink.0.lock().unwrap();
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].contains("◆ Order ID        : FF-2024-01"));
    assert!(receipts[0].contains("◆ UniPin Code     : UP-777"));
    assert!(!receipts[0].contains("Order Details"));
}

#[tokio::test]
async fn restarting_a_flow_discards_captured_fields() {
    let (engine, sink) = engine();

    engine.start_topup(OWNER, CHAT, "123456", "PlayerOne").await;
    turn(&engine, "y").await;
    turn(&engine, "STALE-UNIPIN").await;

    // A fresh .tp replaces the half-finished flow entirely.
    engine.start_topup(OWNER, CHAT, "123456", "PlayerOne").await;
    turn(&engine, "y").await;
    turn(&engine, "FRESH-UNIPIN").await;
    turn(&engine, "TRX1").await;
    turn(&engine, "Pack").await;
    turn(&engine, "50").await;
    turn(&engine, "/gen").await;
    turn(&engine, "y").await;

    let receipts = sink.0.lock().unwrap();
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].contains("FRESH-UNIPIN"));
    assert!(!receipts[0].contains("STALE-UNIPIN"));
}

#[tokio::test]
async fn unknown_uid_ends_general_order_without_receipt() {
    let (engine, sink) = engine();
    engine.start_general_order(OWNER, CHAT).await;

    let reply = turn(&engine, "999999").await;
    assert_eq!(reply, "```\n❌ Error: Player not found. UID: 999999\n```");
    assert!(!engine.has_conversation(OWNER).await);
    assert!(sink.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn turns_in_another_chat_are_ignored() {
    let (engine, sink) = engine();
    engine.start_general_order(OWNER, CHAT).await;

    assert_eq!(engine.handle_turn(OWNER, 99, "123456", true).await, None);
    // The flow is still waiting for a UID in its own chat.
    assert_eq!(
        turn(&engine, "123456").await,
        "**PlayerOne** - Enter order detail and method:"
    );
    assert!(sink.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_identities_do_not_interfere() {
    let (engine, sink) = engine();
    engine.start_general_order(1, 10).await;
    engine.start_general_order(2, 20).await;

    assert_eq!(
        engine.handle_turn(1, 10, "123456", true).await.unwrap(),
        "**PlayerOne** - Enter order detail and method:"
    );
    // Identity 2 is still at its own UID step.
    assert_eq!(
        engine.handle_turn(2, 20, "123456", true).await.unwrap(),
        "**PlayerOne** - Enter order detail and method:"
    );

    assert!(sink.0.lock().unwrap().is_empty());
    assert!(engine.has_conversation(1).await);
    assert!(engine.has_conversation(2).await);
}

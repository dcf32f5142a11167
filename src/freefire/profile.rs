//! Player profile display formatting
//!
//! Renders a [`PlayerProfile`] into the fixed monospace block sent in reply
//! to `.cid`. Missing fields render as `N/A` rather than failing the whole
//! profile.

use serde_json::Value;

use crate::core::utils::{format_number, unix_to_date};
use crate::freefire::api::PlayerProfile;

/// Display placeholder for absent fields.
const PLACEHOLDER: &str = "N/A";

/// Render an optional JSON field as display text.
pub fn field_text(field: &Option<Value>) -> String {
    match field {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render an optional JSON field as a thousands-separated number.
fn field_number(field: &Option<Value>) -> String {
    let raw = field_text(field);
    format_number(&raw)
}

/// Render an optional unix-timestamp field as a date string.
fn field_date(field: &Option<Value>) -> String {
    let raw = field_text(field);
    if raw == PLACEHOLDER {
        return raw;
    }
    unix_to_date(&raw)
}

/// Map a Battle Royale rank position to its tier name.
pub fn rank_tier(rank: i64) -> &'static str {
    if rank <= 100 {
        "Heroic"
    } else if rank <= 500 {
        "Diamond"
    } else if rank <= 1000 {
        "Platinum"
    } else if rank <= 2000 {
        "Gold"
    } else {
        "Silver/Bronze"
    }
}

fn region_display(region: &str) -> String {
    if region == "BD" {
        "🇧🇩 Bangladesh".to_string()
    } else {
        format!("🌍 {}", region)
    }
}

fn account_type_display(field: &Option<Value>) -> String {
    match field.as_ref().and_then(Value::as_i64) {
        Some(1) => "Garena (1)".to_string(),
        Some(other) => format!("Guest ({})", other),
        None => format!("Guest ({})", field_text(field)),
    }
}

/// Render the full profile block for the `.cid` command.
pub fn format_player_profile(profile: &PlayerProfile) -> String {
    let basic = profile.basicinfo.clone().unwrap_or_default();
    let pet = profile.petinfo.clone().unwrap_or_default();
    let social = profile.socialinfo.clone().unwrap_or_default();
    let credit = profile.creditscoreinfo.clone().unwrap_or_default();

    let br_rank = field_text(&basic.rank);
    let tier = basic
        .rank
        .as_ref()
        .and_then(Value::as_i64)
        .map(rank_tier)
        .unwrap_or(PLACEHOLDER);

    let veteran = match &basic.veteranexpiretime {
        Some(Value::String(s)) if s.is_empty() => PLACEHOLDER.to_string(),
        None => PLACEHOLDER.to_string(),
        other => field_date(other),
    };

    let mut lines = Vec::new();
    lines.push("```".to_string());
    lines.push("🎮 Free Fire Player Profile".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(String::new());
    lines.push(format!("👤 Nickname: {}", field_text(&basic.nickname)));
    lines.push(format!("🆔 Player ID: {}", field_text(&basic.accountid)));
    lines.push(format!("🌍 Region: {}", region_display(&field_text(&basic.region))));
    lines.push(format!("🧾 Account Type: {}", account_type_display(&basic.accounttype)));
    lines.push(format!("🏅 Level: {}", field_text(&basic.level)));
    lines.push(format!("✨ EXP: {}", field_number(&basic.exp)));
    lines.push(format!("❤️ Likes: {}", field_number(&basic.liked)));
    lines.push(format!("📅 Created On: 🗓️ {}", field_date(&basic.createat)));
    lines.push(format!("🔑 Last Login: ⏱️ {}", field_date(&basic.lastloginat)));
    lines.push(String::new());
    lines.push("🏆 Rank Information".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(format!("🎯 Battle Royale Rank: {} 🏵️ ({})", br_rank, tier));
    lines.push(format!("⭐ Ranking Points: {}", field_number(&basic.rankingpoints)));
    lines.push(format!("🚀 Max Rank: {}", field_text(&basic.maxrank)));
    lines.push(format!("⚔️ Clash Squad Rank: {}", field_text(&basic.csrank)));
    lines.push(format!("🎯 CS Points: {}", field_text(&basic.csrankingpoints)));
    lines.push(format!("🦈 Hippo Rank: {}", field_text(&basic.hipporank)));
    lines.push(String::new());
    lines.push("🐾 Pet Information".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(format!("🐶 Pet Name: {}", field_text(&pet.name)));
    lines.push(format!("🆔 Pet ID: {}", field_text(&pet.id)));
    lines.push(format!(
        "📈 Level: {} — EXP: {}",
        field_text(&pet.level),
        field_number(&pet.exp)
    ));
    lines.push(format!("🎨 Skin ID: {}", field_text(&pet.skinid)));
    lines.push(format!("💥 Selected Skill ID: {}", field_text(&pet.selectedskillid)));
    lines.push(String::new());
    lines.push("✍️ Social Information".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(format!("💬 Signature: \"{}\"", field_text(&social.signature)));
    lines.push(String::new());
    lines.push("🛡️ Veteran Status".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(format!("🎖️ Expires: 🗓️ {}", veteran));
    lines.push(String::new());
    lines.push("⭐ Credit Score".to_string());
    lines.push("═══════════════════════════════".to_string());
    lines.push(format!("🏅 Score: {}/100", field_text(&credit.creditscore)));
    lines.push("```".to_string());

    lines.join("\n")
}

use booster_core::{Card, Currency, Pack, Slot};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const COLORLESS: &str = "⚙️";

fn color_glyph(symbol: &str) -> &'static str {
    match symbol {
        "W" => "⚪",
        "U" => "🔵",
        "B" => "⚫",
        "R" => "🔴",
        "G" => "🟢",
        _ => COLORLESS,
    }
}

/// Basic lands sometimes come back without an identity; their name says it.
fn basic_land_identity(card: &Card) -> Option<&'static str> {
    let type_line = card.type_line.to_lowercase();
    if !type_line.contains("land") || !type_line.contains("basic") || type_line.contains("wastes") {
        return None;
    }
    let name = card.name.to_lowercase();
    [
        ("plains", "W"),
        ("island", "U"),
        ("swamp", "B"),
        ("mountain", "R"),
        ("forest", "G"),
    ]
    .into_iter()
    .find(|(land, _)| name.contains(land))
    .map(|(_, symbol)| symbol)
}

pub fn color_glyphs(card: &Card) -> String {
    if card.color_identity.is_empty() {
        return basic_land_identity(card)
            .map(color_glyph)
            .unwrap_or(COLORLESS)
            .to_string();
    }
    card.color_identity
        .iter()
        .map(|symbol| color_glyph(symbol))
        .collect()
}

pub fn price_label(card: &Card, foil: bool) -> String {
    match card.prices.quote(foil) {
        Some((value, currency)) => format!("{value} {}", currency.symbol()),
        None => "N/A".to_string(),
    }
}

/// `(rarity) (treatment) (FOIL) <colors> <name> <price>`, treatment only
/// when it is not the regular frame.
pub fn card_line(card: &Card, foil: bool) -> String {
    let mut parts = vec![format!("({})", card.rarity)];
    if card.has_special_treatment() {
        parts.push(format!("({})", card.treatment_label().to_lowercase()));
    }
    if foil {
        parts.push("(FOIL)".to_string());
    }
    parts.push(color_glyphs(card));
    parts.push(card.name.clone());
    parts.push(price_label(card, foil));
    parts.join(" ")
}

fn rarity_color(rarity: &str) -> Color {
    match rarity {
        "mythic" => Color::Red,
        "rare" => Color::Yellow,
        "uncommon" => Color::Cyan,
        _ => Color::Reset,
    }
}

fn styled_line(card: &Card, foil: bool) -> String {
    let line = card_line(card, foil).with(rarity_color(&card.rarity));
    if card.is_legendary() {
        line.bold().to_string()
    } else {
        line.to_string()
    }
}

/// Currency label for a pack total; mixed quotes are summed as-is.
pub fn total_currency(pack: &Pack) -> &'static str {
    let main = pack
        .cards()
        .chain(pack.bonus.iter())
        .filter_map(|card| card.prices.quote(card.foil_print).map(|(_, currency)| currency));
    let foil = pack
        .foil
        .iter()
        .filter_map(|card| card.prices.quote(true).map(|(_, currency)| currency));
    let mut currencies = main.chain(foil);
    let Some(first) = currencies.next() else {
        return Currency::Eur.symbol();
    };
    if currencies.all(|currency| currency == first) {
        first.symbol()
    } else {
        "€/$"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reveal {
    pub enabled: bool,
}

impl Reveal {
    fn pause(self, card: Option<&Card>) {
        if !self.enabled {
            return;
        }
        let secs = if card.is_some_and(Card::is_rare_or_better) { 3 } else { 2 };
        thread::sleep(Duration::from_secs(secs));
    }
}

pub fn print_pack(pack: &Pack, reveal: Reveal, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nYour {} Booster Pack:\n", pack.code.to_uppercase())?;
    for (idx, entry) in pack.entries.iter().enumerate() {
        match &entry.card {
            Some(card) => {
                let marker = if entry.slot == Slot::Post { "+" } else { " " };
                writeln!(out, "{:02}.{marker}{}", idx + 1, styled_line(card, card.foil_print))?;
            }
            None => writeln!(out, "{:02}. (no card: lookup failed)", idx + 1)?,
        }
        out.flush()?;
        reveal.pause(entry.card.as_ref());
    }
    if let Some(foil) = &pack.foil {
        reveal.pause(None);
        writeln!(out, "\n✨ Foil:")?;
        writeln!(out, "{}", styled_line(foil, true))?;
    }
    if let Some(bonus) = &pack.bonus {
        reveal.pause(None);
        writeln!(out, "\n📜 Bonus Sheet:")?;
        writeln!(out, "{}", styled_line(bonus, bonus.foil_print))?;
    }
    writeln!(out, "\n🎟️ Tokens/Art Cards: {}", pack.token_count)?;
    writeln!(
        out,
        "💰 Total Pack Value: {:.2}{}",
        pack.total_value(),
        total_currency(pack)
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use booster_core::PackEntry;

    fn priced(name: &str, rarity: &str, eur: Option<&str>, usd: Option<&str>) -> Card {
        let mut card = Card::named(name, rarity);
        card.prices.eur = eur.map(str::to_string);
        card.prices.usd = usd.map(str::to_string);
        card
    }

    #[test]
    fn line_shows_special_treatment_and_foil() {
        let mut card = priced("Ugin, Eye of the Storms", "mythic", Some("42.10"), None);
        card.treatment = Some("Borderless".to_string());
        card.prices.eur_foil = Some("80.00".to_string());
        assert_eq!(
            card_line(&card, true),
            "(mythic) (borderless) (FOIL) ⚙️ Ugin, Eye of the Storms 80.00 €"
        );
    }

    #[test]
    fn regular_treatment_is_hidden() {
        let mut card = priced("Llanowar Elves", "common", None, Some("0.25"));
        card.color_identity = vec!["G".to_string()];
        card.treatment = Some("regular".to_string());
        assert_eq!(card_line(&card, false), "(common) 🟢 Llanowar Elves 0.25 $");
    }

    #[test]
    fn missing_price_shows_not_available() {
        let card = priced("Opt", "common", None, None);
        assert!(card_line(&card, false).ends_with("Opt N/A"));
    }

    #[test]
    fn basic_land_color_comes_from_name() {
        let mut island = Card::named("Island", "common");
        island.type_line = "Basic Land — Island".to_string();
        assert_eq!(color_glyphs(&island), "🔵");
        let mut wastes = Card::named("Wastes", "common");
        wastes.type_line = "Basic Land".to_string();
        assert_eq!(color_glyphs(&wastes), "⚙️");
    }

    #[test]
    fn multicolor_identity_keeps_order() {
        let mut card = Card::named("Teval", "mythic");
        card.color_identity = vec!["B".to_string(), "G".to_string(), "U".to_string()];
        assert_eq!(color_glyphs(&card), "⚫🟢🔵");
    }

    #[test]
    fn printed_pack_ends_with_total() {
        let mut foil = priced("Shiny", "rare", None, None);
        foil.prices.eur_foil = Some("3.50".to_string());
        foil.foil_print = true;
        let pack = Pack {
            code: "woe".to_string(),
            entries: vec![
                PackEntry {
                    slot: Slot::Common,
                    card: Some(priced("Common One", "common", Some("0.10"), None)),
                },
                PackEntry {
                    slot: Slot::Uncommon,
                    card: None,
                },
            ],
            foil: Some(foil),
            bonus: Some(priced("Bonus", "rare", Some("1.40"), None)),
            token_count: 1,
        };
        let mut out = Vec::new();
        print_pack(&pack, Reveal::default(), &mut out).expect("print");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Your WOE Booster Pack"));
        assert!(text.contains("Common One 0.10 €"));
        assert!(text.contains("02. (no card: lookup failed)"));
        assert!(text.contains("(FOIL)"));
        assert!(text.contains("📜 Bonus Sheet:"));
        assert!(text.contains("🎟️ Tokens/Art Cards: 1"));
        assert!(text.trim_end().ends_with("Total Pack Value: 5.00€"));
    }

    #[test]
    fn mixed_currencies_are_flagged() {
        let pack = Pack {
            code: "x".to_string(),
            entries: vec![
                PackEntry {
                    slot: Slot::Common,
                    card: Some(priced("A", "common", Some("1.00"), None)),
                },
                PackEntry {
                    slot: Slot::Common,
                    card: Some(priced("B", "common", None, Some("1.00"))),
                },
            ],
            foil: None,
            bonus: None,
            token_count: 1,
        };
        assert_eq!(total_currency(&pack), "€/$");
    }
}

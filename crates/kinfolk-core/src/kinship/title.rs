//! Rendering structured kinship into locale-specific titles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::classify::{CousinLine, Kinship, Partner, Seniority, Sex, Side};
use super::rank::BirthRank;

/// Title vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Traditional Chinese as used in Taiwan.
    #[default]
    #[serde(rename = "zh-TW", alias = "zh-tw", alias = "zh")]
    ZhTw,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZhTw => "zh-TW",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale '{0}' (expected zh-TW or en)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-tw" | "zh_tw" | "zh" => Ok(Self::ZhTw),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl Kinship {
    /// Title in the given vocabulary.
    #[must_use]
    pub fn title(self, locale: Locale) -> String {
        match locale {
            Locale::ZhTw => zh_tw(self),
            Locale::En => en(self),
        }
    }
}

const ZH_NUMERALS: [&str; 10] = ["大", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

#[allow(clippy::too_many_lines)]
fn zh_tw(kinship: Kinship) -> String {
    use Seniority::{Older, Younger};
    use Sex::{Female, Male};

    let pick = |cond: bool, a: &str, b: &str| (if cond { a } else { b }).to_string();
    let line_prefix = |line: CousinLine| match line {
        CousinLine::Agnatic => "堂",
        CousinLine::Other => "表",
    };
    let sibling_suffix = |sex: Sex, seniority: Seniority| match (sex, seniority) {
        (Male, Older) => "哥",
        (Male, Younger) => "弟",
        (Female, Older) => "姊",
        (Female, Younger) => "妹",
    };

    match kinship {
        Kinship::Oneself => "本人".to_string(),
        Kinship::Parent { sex } => pick(sex == Male, "爸爸", "媽媽"),
        Kinship::Child { sex } => pick(sex == Male, "兒子", "女兒"),
        Kinship::Partner { partner } => partner_zh(partner).to_string(),
        Kinship::SiblingSpouse { sibling, seniority } => match (sibling, seniority) {
            (Male, Older) => "嫂嫂",
            (Male, Younger) => "弟媳",
            (Female, Older) => "姊夫",
            (Female, Younger) => "妹夫",
        }
        .to_string(),
        Kinship::Grandparent { side, sex } => match (side, sex) {
            (Side::Paternal, Male) => "爺爺",
            (Side::Paternal, Female) => "奶奶",
            (Side::Maternal, Male) => "外公",
            (Side::Maternal, Female) => "外婆",
        }
        .to_string(),
        Kinship::GreatGrandparent { via, sex } => match (via, sex) {
            (Male, Male) => "阿祖 (曾祖父)",
            (Male, Female) => "阿祖 (曾祖母)",
            (Female, Male) => "阿祖 (曾外祖父)",
            (Female, Female) => "阿祖 (曾外祖母)",
        }
        .to_string(),
        Kinship::PaternalAncestor => "太祖".to_string(),
        Kinship::Grandchild { via, sex } => match (via, sex) {
            (Male, Male) => "孫子",
            (Male, Female) => "孫女",
            (Female, Male) => "外孫",
            (Female, Female) => "外孫女",
        }
        .to_string(),
        Kinship::GreatGrandchild { sex } => pick(sex == Male, "曾孫", "曾孫女"),
        Kinship::Sibling {
            sex,
            seniority,
            rank,
        } => {
            let suffix = sibling_suffix(sex, seniority);
            match rank {
                None => format!("{suffix}{suffix}"),
                Some(BirthRank::Eldest) => format!("大{suffix}"),
                Some(BirthRank::Youngest) => format!("小{suffix}"),
                Some(BirthRank::Ordinal(n)) => match n.checked_sub(1).and_then(|i| ZH_NUMERALS.get(i)) {
                    Some(numeral) => format!("{numeral}{suffix}"),
                    None => format!("{n}{suffix}"),
                },
            }
        }
        Kinship::SiblingChild { via, sex } => match (via, sex) {
            (Male, Male) => "姪子",
            (Male, Female) => "姪女",
            (Female, Male) => "外甥",
            (Female, Female) => "外甥女",
        }
        .to_string(),
        Kinship::ParentSibling {
            side,
            sex,
            seniority,
        } => match (side, sex, seniority) {
            (Side::Paternal, Male, Some(Older)) => "伯伯",
            (Side::Paternal, Male, Some(Younger)) => "叔叔",
            (Side::Paternal, Male, None) => "伯叔",
            (Side::Paternal, Female, _) => "姑姑",
            (Side::Maternal, Male, _) => "舅舅",
            (Side::Maternal, Female, _) => "阿姨",
        }
        .to_string(),
        Kinship::ParentSiblingSpouse { side, sibling } => match (side, sibling) {
            (Side::Paternal, Male) => "嬸嬸/伯母",
            (Side::Paternal, Female) => "姑丈",
            (Side::Maternal, Male) => "舅媽",
            (Side::Maternal, Female) => "姨丈",
        }
        .to_string(),
        Kinship::Cousin {
            line,
            sex,
            seniority,
        } => format!("{}{}", line_prefix(line), sibling_suffix(sex, seniority)),
        Kinship::CousinSpouse {
            line,
            sex,
            seniority,
        } => {
            let base = match (sex, seniority) {
                (Male, Older) => "姊夫",
                (Male, Younger) => "妹夫",
                (Female, Older) => "嫂",
                (Female, Younger) => "弟媳",
            };
            format!("{}{base}", line_prefix(line))
        }
        Kinship::CousinChild { line, via, sex } => {
            let base = match (via, sex) {
                (Male, Male) => "姪",
                (Male, Female) => "姪女",
                (Female, Male) => "外甥",
                (Female, Female) => "外甥女",
            };
            format!("{}{base}", line_prefix(line))
        }
        Kinship::SpouseParent { partner, sex } => match (partner, sex) {
            (Partner::Husband, Male) => "公公",
            (Partner::Husband, Female) => "婆婆",
            (_, Male) => "岳父",
            (_, Female) => "岳母",
        }
        .to_string(),
        Kinship::SpouseBrother { partner } => format!("{}的兄弟", partner_zh(partner)),
        Kinship::ChildSpouse { child } => pick(child == Male, "媳婦", "女婿"),
        Kinship::Distant => "遠親".to_string(),
        Kinship::Relative => "親戚".to_string(),
    }
}

const fn partner_zh(partner: Partner) -> &'static str {
    match partner {
        Partner::Husband => "老公",
        Partner::Wife => "老婆",
        Partner::Spouse => "配偶",
    }
}

fn en(kinship: Kinship) -> String {
    use Sex::{Female, Male};

    let gendered = |sex: Sex, male: &str, female: &str| match sex {
        Male => male.to_string(),
        Female => female.to_string(),
    };
    let age = |seniority: Seniority| match seniority {
        Seniority::Older => "older",
        Seniority::Younger => "younger",
    };
    let side_name = |side: Side| match side {
        Side::Paternal => "paternal",
        Side::Maternal => "maternal",
    };
    let cousin = |line: CousinLine| match line {
        CousinLine::Agnatic => "paternal cousin",
        CousinLine::Other => "cousin",
    };

    match kinship {
        Kinship::Oneself => "self".to_string(),
        Kinship::Parent { sex } => gendered(sex, "father", "mother"),
        Kinship::Child { sex } => gendered(sex, "son", "daughter"),
        Kinship::Partner { partner } => partner_en(partner).to_string(),
        Kinship::SiblingSpouse { sibling, seniority } => match sibling {
            Male => format!("{} brother's wife", age(seniority)),
            Female => format!("{} sister's husband", age(seniority)),
        },
        Kinship::Grandparent { side, sex } => {
            format!("{} {}", side_name(side), gendered(sex, "grandfather", "grandmother"))
        }
        Kinship::GreatGrandparent { via, sex } => {
            let base = gendered(sex, "great-grandfather", "great-grandmother");
            match via {
                Male => base,
                Female => format!("{base} (through paternal grandmother)"),
            }
        }
        Kinship::PaternalAncestor => "paternal ancestor".to_string(),
        Kinship::Grandchild { via, sex } => match via {
            Male => gendered(sex, "grandson", "granddaughter"),
            Female => gendered(sex, "daughter's son", "daughter's daughter"),
        },
        Kinship::GreatGrandchild { sex } => gendered(sex, "great-grandson", "great-granddaughter"),
        Kinship::Sibling {
            sex,
            seniority,
            rank,
        } => {
            let base = format!("{} {}", age(seniority), gendered(sex, "brother", "sister"));
            match rank {
                None => base,
                Some(BirthRank::Eldest) => format!("{base} (eldest)"),
                Some(BirthRank::Youngest) => format!("{base} (youngest)"),
                Some(BirthRank::Ordinal(n)) => format!("{base} ({})", ordinal(n)),
            }
        }
        Kinship::SiblingChild { via, sex } => format!(
            "{}'s {}",
            gendered(via, "brother", "sister"),
            gendered(sex, "son", "daughter")
        ),
        Kinship::ParentSibling {
            side,
            sex,
            seniority,
        } => match (side, sex, seniority) {
            (Side::Paternal, Male, Some(s)) => format!("father's {} brother", age(s)),
            _ => format!("{} {}", side_name(side), gendered(sex, "uncle", "aunt")),
        },
        Kinship::ParentSiblingSpouse { side, sibling } => format!(
            "{} {}",
            side_name(side),
            gendered(sibling, "uncle's wife", "aunt's husband")
        ),
        Kinship::Cousin {
            line,
            sex,
            seniority,
        } => format!("{} {} ({})", age(seniority), cousin(line), gendered(sex, "male", "female")),
        Kinship::CousinSpouse {
            line,
            sex,
            seniority,
        } => format!(
            "{} {}'s {}",
            age(seniority),
            cousin(line),
            gendered(sex, "husband", "wife")
        ),
        Kinship::CousinChild { line, sex, .. } => {
            format!("{}'s {}", cousin(line), gendered(sex, "son", "daughter"))
        }
        Kinship::SpouseParent { sex, .. } => gendered(sex, "father-in-law", "mother-in-law"),
        Kinship::SpouseBrother { partner } => format!("{}'s brother", partner_en(partner)),
        Kinship::ChildSpouse { child } => gendered(child, "daughter-in-law", "son-in-law"),
        Kinship::Distant => "distant relative".to_string(),
        Kinship::Relative => "relative".to_string(),
    }
}

const fn partner_en(partner: Partner) -> &'static str {
    match partner {
        Partner::Husband => "husband",
        Partner::Wife => "wife",
        Partner::Spouse => "spouse",
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

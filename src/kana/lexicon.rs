//! Fixed readings used by the script converter.
//!
//! Keys are looked up by longest match (up to [`MAX_KEY_CHARS`] characters), so a compound
//! such as `人工知能` wins over any shorter entry starting at the same position. Kanji that
//! are not listed here pass through the converter untouched.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Longest key, in characters, the converter will try.
pub const MAX_KEY_CHARS: usize = 6;

#[rustfmt::skip]
const KATAKANA: &[(&str, &str)] = &[
    ("ァ", "ぁ"), ("ア", "あ"), ("ィ", "ぃ"), ("イ", "い"), ("ゥ", "ぅ"), ("ウ", "う"),
    ("ェ", "ぇ"), ("エ", "え"), ("ォ", "ぉ"), ("オ", "お"),
    ("カ", "か"), ("キ", "き"), ("ク", "く"), ("ケ", "け"), ("コ", "こ"),
    ("ガ", "が"), ("ギ", "ぎ"), ("グ", "ぐ"), ("ゲ", "げ"), ("ゴ", "ご"),
    ("サ", "さ"), ("シ", "し"), ("ス", "す"), ("セ", "せ"), ("ソ", "そ"),
    ("ザ", "ざ"), ("ジ", "じ"), ("ズ", "ず"), ("ゼ", "ぜ"), ("ゾ", "ぞ"),
    ("タ", "た"), ("チ", "ち"), ("ッ", "っ"), ("ツ", "つ"), ("テ", "て"), ("ト", "と"),
    ("ダ", "だ"), ("ヂ", "ぢ"), ("ヅ", "づ"), ("デ", "で"), ("ド", "ど"),
    ("ナ", "な"), ("ニ", "に"), ("ヌ", "ぬ"), ("ネ", "ね"), ("ノ", "の"),
    ("ハ", "は"), ("ヒ", "ひ"), ("フ", "ふ"), ("ヘ", "へ"), ("ホ", "ほ"),
    ("バ", "ば"), ("ビ", "び"), ("ブ", "ぶ"), ("ベ", "べ"), ("ボ", "ぼ"),
    ("パ", "ぱ"), ("ピ", "ぴ"), ("プ", "ぷ"), ("ペ", "ぺ"), ("ポ", "ぽ"),
    ("マ", "ま"), ("ミ", "み"), ("ム", "む"), ("メ", "め"), ("モ", "も"),
    ("ャ", "ゃ"), ("ヤ", "や"), ("ュ", "ゅ"), ("ユ", "ゆ"), ("ョ", "ょ"), ("ヨ", "よ"),
    ("ラ", "ら"), ("リ", "り"), ("ル", "る"), ("レ", "れ"), ("ロ", "ろ"),
    ("ヮ", "ゎ"), ("ワ", "わ"), ("ヰ", "ゐ"), ("ヱ", "ゑ"), ("ヲ", "を"), ("ン", "ん"),
    ("ヴ", "ゔ"), ("ー", "ー"),
];

// Full-width digits and symbols the romanizer has no entry for.
#[rustfmt::skip]
const SYMBOLS: &[(&str, &str)] = &[
    ("０", "0"), ("１", "1"), ("２", "2"), ("３", "3"), ("４", "4"),
    ("５", "5"), ("６", "6"), ("７", "7"), ("８", "8"), ("９", "9"),
    ("：", ":"), ("；", ";"), ("・", "/"), ("〜", "~"), ("－", "-"), ("＋", "+"), ("＝", "="),
    ("【", "["), ("】", "]"), ("『", "["), ("』", "]"), ("〔", "["), ("〕", "]"),
];

#[rustfmt::skip]
const WORDS: &[(&str, &str)] = &[
    // everyday
    ("今日", "きょう"), ("天気", "てんき"), ("楽しい", "たのしい"), ("楽しみ", "たのしみ"),
    ("楽しむ", "たのしむ"), ("日本語", "にほんご"), ("練習", "れんしゅう"),
    ("練習用", "れんしゅうよう"), ("練習文", "れんしゅうぶん"), ("桜", "さくら"),
    ("咲く", "さく"), ("咲き", "さき"), ("季節", "きせつ"), ("飲み", "のみ"),
    ("仕事", "しごと"), ("音楽", "おんがく"), ("音", "おん"), ("楽", "がく"),
    ("聴き", "きき"), ("聴く", "きく"), ("聴", "き"), ("読書", "どくしょ"), ("読", "よ"),
    ("書", "しょ"), ("知識", "ちしき"), ("知", "ち"), ("識", "しき"),
    ("広げる", "ひろげる"), ("広", "ひろ"), ("広く", "ひろく"),
    ("素晴らしい", "すばらしい"), ("素", "そ"), ("晴", "はら"), ("習慣", "しゅうかん"),
    ("習", "しゅう"), ("慣", "かん"), ("新しい", "あたらしい"), ("新", "しん"),
    ("新た", "あらた"), ("学ぶ", "まなぶ"), ("学", "がく"), ("春", "はる"), ("花", "はな"),
    ("美しく", "うつくしく"), ("美しい", "うつくしい"), ("多く", "おおく"),
    ("人々", "ひとびと"), ("花見", "はなみ"), ("公園", "こうえん"), ("川沿い", "かわぞい"),
    ("並木", "なみき"), ("白", "しろ"), ("白く", "しろく"), ("彩られ", "いろどられ"),
    ("雲", "くも"), ("見え", "みえ"), ("見られ", "みられ"), ("時期", "じき"),
    ("家族", "かぞく"), ("友人", "ゆうじん"), ("一緒", "いっしょ"), ("弁当", "べんとう"),
    ("持って", "もって"), ("出かけ", "でかけ"), ("下", "した"), ("人たち", "ひとたち"),
    ("夜", "よる"), ("提灯", "ちょうちん"), ("灯され", "ともされ"), ("夜桜", "よざくら"),
    ("見物", "けんぶつ"), ("人気", "にんき"), ("短い", "みじかい"), ("大切", "たいせつ"),
    ("愛で", "めで"), ("過ごし", "すごし"), ("象徴的", "しょうちょうてき"),
    ("古く", "ふるく"), ("親しまれて", "したしまれて"), ("大きく", "おおきく"),
    ("大きな", "おおきな"), ("変えて", "かえて"), ("考える", "かんがえる"),
    ("長い", "ながい"), ("長さ", "ながさ"), ("少し", "すこし"), ("心", "こころ"),
    ("使い", "つかい"), ("使われて", "つかわれて"), ("近い", "ちかい"), ("寒い", "さむい"),
    ("冬", "ふゆ"), ("体", "からだ"), ("高く", "たかく"), ("特に", "とくに"), ("店", "みせ"),
    ("得て", "えて"), ("主な", "おもな"), ("基に", "もとに"), ("関する", "かんする"),
    ("見た目", "みため"), ("月", "がつ"), ("日", "にち"),
    // society and technology
    ("現代", "げんだい"), ("社会", "しゃかい"), ("進歩", "しんぽ"), ("私たち", "わたしたち"),
    ("生活", "せいかつ"), ("普及", "ふきゅう"), ("世界中", "せかいじゅう"),
    ("情報", "じょうほう"), ("瞬時", "しゅんじ"), ("人工知能", "じんこうちのう"),
    ("機械学習", "きかいがくしゅう"), ("技術", "ぎじゅつ"), ("発達", "はったつ"),
    ("自動運転車", "じどううんてんしゃ"), ("音声認識", "おんせいにんしき"),
    ("以前", "いぜん"), ("想像", "そうぞう"), ("実用化", "じつようか"), ("一方", "いっぽう"),
    ("保護", "ほご"), ("課題", "かだい"), ("生まれて", "うまれて"), ("革新", "かくしん"),
    ("発表", "はっぴょう"), ("経済", "けいざい"), ("成長率", "せいちょうりつ"),
    ("成長", "せいちょう"), ("環境", "かんきょう"), ("政策", "せいさく"),
    ("決定", "けってい"), ("国際", "こくさい"), ("大会", "たいかい"), ("開催", "かいさい"),
    ("教育", "きょういく"), ("分野", "ぶんや"), ("改革案", "かいかくあん"),
    ("提示", "ていじ"), ("政府", "せいふ"), ("中小企業", "ちゅうしょうきぎょう"),
    ("支援", "しえん"), ("強化", "きょうか"), ("雇用", "こよう"), ("創出", "そうしゅつ"),
    ("目標", "もくひょう"), ("今後", "こんご"), ("数年間", "すうねんかん"),
    ("効果", "こうか"), ("期待", "きたい"), ("専門家", "せんもんか"), ("適切", "てきせつ"),
    ("実施", "じっし"), ("安定", "あんてい"), ("評価", "ひょうか"), ("最新", "さいしん"),
    ("科学", "かがく"), ("研究", "けんきゅう"), ("持続可能", "じぞくかのう"),
    ("開発", "かいはつ"), ("進展", "しんてん"), ("負荷", "ふか"), ("大幅", "おおはば"),
    ("削減", "さくげん"), ("効率的", "こうりつてき"), ("利用", "りよう"),
    ("可能", "かのう"), ("向けた", "むけた"), ("取り組み", "とりくみ"),
    ("加速", "かそく"), ("将来", "しょうらい"), ("実現", "じつげん"),
    // yamanashi
    ("富士山", "ふじさん"), ("山梨県", "やまなしけん"), ("山", "やま"), ("桃", "もも"),
    ("産地", "さんち"), ("有名", "ゆうめい"), ("郷土料理", "きょうどりょうり"),
    ("料理", "りょうり"), ("甲府市", "こうふし"), ("県庁所在地", "けんちょうしょざいち"),
    ("河口湖", "かわぐちこ"), ("幅広", "はばひろ"), ("麺", "めん"), ("野菜", "やさい"),
    ("味噌仕立て", "みそじたて"), ("汁", "しる"), ("煮込んだ", "にこんだ"),
    ("大根", "だいこん"), ("人参", "にんじん"), ("白菜", "はくさい"),
    ("栄養価", "えいようか"), ("温める", "あたためる"), ("県内", "けんない"),
    ("味わう", "あじわう"),
    // literature
    ("吾輩", "わがはい"), ("猫", "ねこ"), ("名前", "なまえ"), ("無い", "ない"),
    ("国境", "こっきょう"), ("抜ける", "ぬける"), ("雪国", "ゆきぐに"),
    ("祇園精舎", "ぎおんしょうじゃ"), ("鐘", "かね"), ("声", "こえ"),
    ("諸行無常", "しょぎょうむじょう"), ("響き", "ひびき"), ("激怒", "げきど"),
    ("必ず", "かならず"), ("邪智暴虐", "じゃちぼうぎゃく"), ("王", "おう"),
    ("除か", "のぞか"), ("決意", "けつい"), ("貧しい", "まずしい"), ("木こり", "きこり"),
    ("夫婦", "ふうふ"), ("住んで", "すんで"), ("山際", "やまぎわ"),
    ("明かりて", "あかりて"), ("太宰治", "だざいおさむ"), ("走れ", "はしれ"),
    ("走り", "はしり"), ("友情", "ゆうじょう"), ("信頼", "しんらい"),
    ("短編小説", "たんぺんしょうせつ"), ("暴君", "ぼうくん"), ("処刑", "しょけい"),
    ("宣告", "せんこく"), ("人質", "ひとじち"), ("残して", "のこして"),
    ("故郷", "こきょう"), ("帰り", "かえり"), ("約束", "やくそく"), ("期限", "きげん"),
    ("戻って", "もどって"), ("物語", "ものがたり"), ("必死", "ひっし"),
    ("揺るぎない", "ゆるぎない"), ("読者", "どくしゃ"), ("打つ", "うつ"),
    ("名作", "めいさく"),
    // computing
    ("指示", "しじ"), ("与える", "あたえる"), ("整理", "せいり"), ("保存", "ほぞん"),
    ("問題", "もんだい"), ("解決", "かいけつ"), ("手順", "てじゅん"), ("人間", "にんげん"),
    ("知能", "ちのう"), ("模倣", "もほう"), ("間", "かん"), ("通信", "つうしん"),
    ("自動的", "じどうてき"), ("学習", "がくしゅう"), ("基本的", "きほんてき"),
    ("構造", "こうぞう"), ("定義", "ていぎ"), ("動的", "どうてき"), ("機能", "きのう"),
    ("実装", "じっそう"), ("組み合わせる", "くみあわせる"), ("魅力的", "みりょくてき"),
    ("作成", "さくせい"), ("最近", "さいきん"), ("文章", "ぶんしょう"),
    ("生成", "せいせい"), ("向上", "こうじょう"), ("目的", "もくてき"),
    ("入力", "にゅうりょく"), ("提供", "ていきょう"),
];

/// The merged lookup table, built on first use.
pub fn readings() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        KATAKANA
            .iter()
            .chain(SYMBOLS)
            .chain(WORDS)
            .copied()
            .collect()
    })
}

use rand::Rng;

pub type CardId = u32;

/// 默认的 8 张卡面图片
pub const DEFAULT_IMAGES: [&str; 8] = [
    "/anor.jpg",
    "/apelsin.jpg",
    "/banan.jpg",
    "/limon.jpg",
    "/nok.jpg",
    "/olma.jpg",
    "/orik.jpg",
    "/shaftoli.jpg",
];

/// 卡牌朝向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    FaceDown,
    FaceUp, // 已翻开，等待比对
    Matched,
}

/// 单张卡牌
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub image_url: String,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub fn new(id: CardId, image_url: &str) -> Self {
        Self {
            id,
            image_url: image_url.to_string(),
            is_flipped: false,
            is_matched: false,
        }
    }

    pub fn face(&self) -> CardFace {
        if self.is_matched {
            CardFace::Matched
        } else if self.is_flipped {
            CardFace::FaceUp
        } else {
            CardFace::FaceDown
        }
    }

    /// 终端里显示的卡面文字（图片文件名去掉路径和扩展名）
    pub fn label(&self) -> &str {
        let name = self
            .image_url
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.image_url);
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

/// 为每张图片生成一对卡牌，id 依次为 2i 和 2i+1
pub fn build_pairs<S: AsRef<str>>(images: &[S]) -> Vec<Card> {
    images
        .iter()
        .enumerate()
        .flat_map(|(index, image)| {
            let base = index as CardId * 2;
            [Card::new(base, image.as_ref()), Card::new(base + 1, image.as_ref())]
        })
        .collect()
}

/// Fisher–Yates 洗牌：i 从末尾到 1，与 [0, i] 中均匀选取的位置交换
pub fn shuffle_cards<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

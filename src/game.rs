//! 游戏控制器
//!
//! 持有整副牌和选择状态，负责洗牌、翻牌、比对、延迟复位和重开。
//! 不依赖终端，时间由调用方以 `Instant` 传入。

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::models::{Card, CardId, build_pairs, shuffle_cards};

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneSelected,
    Comparing, // 已选两张，锁定中
}

/// 点击被忽略的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    SelectionFull,
    AlreadySelected,
    UnknownCard,
    AlreadyMatched,
    AlreadyFlipped,
}

/// 一次点击的结果，仅用于日志与测试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Flipped,
    Matched,
    Mismatched,
}

/// 待执行的不匹配复位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReset {
    pub due: Instant,
    pub epoch: u64,
    pub ids: [CardId; 2],
}

pub struct GameController {
    images: Vec<String>,
    mismatch_delay: Duration,
    rng: ChaCha8Rng,
    cards: Vec<Card>,
    selected: Vec<CardId>,
    locked: bool,
    epoch: u64,
    pending: Option<PendingReset>,
}

impl GameController {
    /// 创建控制器并立即发一副新牌
    pub fn new(images: Vec<String>, mismatch_delay: Duration, seed: u64) -> Self {
        let mut game = Self {
            images,
            mismatch_delay,
            rng: ChaCha8Rng::seed_from_u64(seed),
            cards: Vec::new(),
            selected: Vec::with_capacity(2),
            locked: false,
            epoch: 0,
            pending: None,
        };
        info!(seed, "使用随机种子");
        game.initialize();
        game
    }

    /// 生成成对卡牌、洗牌并清空选择状态
    ///
    /// 纪元加一；之前排定的复位留在原处，到期时由 `tick` 按纪元丢弃。
    pub fn initialize(&mut self) {
        let mut cards = build_pairs(&self.images);
        shuffle_cards(&mut cards, &mut self.rng);
        self.cards = cards;
        self.selected.clear();
        self.locked = false;
        self.epoch += 1;
        info!(epoch = self.epoch, cards = self.cards.len(), "新的一局");
    }

    pub fn restart(&mut self) {
        self.initialize();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    #[allow(dead_code)]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    #[allow(dead_code)]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[allow(dead_code)]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[allow(dead_code)]
    pub fn pending(&self) -> Option<&PendingReset> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match self.selected.len() {
            0 => Phase::Idle,
            1 if !self.locked => Phase::OneSelected,
            _ => Phase::Comparing,
        }
    }

    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count() / 2
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.is_matched)
    }

    /// 处理点击；非法点击静默忽略
    pub fn handle_card_click(&mut self, id: CardId, now: Instant) -> ClickOutcome {
        let outcome = match self.check_clickable(id) {
            Err(reason) => ClickOutcome::Ignored(reason),
            Ok(()) => {
                if let Some(card) = self.card_mut(id) {
                    card.is_flipped = true;
                }
                self.selected.push(id);
                if self.selected.len() == 2 {
                    self.check_match(now)
                } else {
                    ClickOutcome::Flipped
                }
            }
        };
        debug!(id, ?outcome, "点击卡牌");
        outcome
    }

    fn check_clickable(&self, id: CardId) -> Result<(), IgnoreReason> {
        if self.locked {
            return Err(IgnoreReason::Locked);
        }
        if self.selected.len() >= 2 {
            return Err(IgnoreReason::SelectionFull);
        }
        if self.selected.contains(&id) {
            return Err(IgnoreReason::AlreadySelected);
        }
        let card = self.card(id).ok_or(IgnoreReason::UnknownCard)?;
        if card.is_matched {
            return Err(IgnoreReason::AlreadyMatched);
        }
        if card.is_flipped {
            return Err(IgnoreReason::AlreadyFlipped);
        }
        Ok(())
    }

    fn check_match(&mut self, now: Instant) -> ClickOutcome {
        self.locked = true;

        let ids = [self.selected[0], self.selected[1]];
        let same_image = match (self.card(ids[0]), self.card(ids[1])) {
            (Some(first), Some(second)) => first.image_url == second.image_url,
            _ => false,
        };

        if same_image {
            for id in ids {
                if let Some(card) = self.card_mut(id) {
                    card.is_matched = true;
                }
            }
            self.selected.clear();
            self.locked = false;
            debug!(?ids, matched = self.matched_pairs(), "配对成功");
            ClickOutcome::Matched
        } else {
            self.pending = Some(PendingReset {
                due: now + self.mismatch_delay,
                epoch: self.epoch,
                ids,
            });
            debug!(?ids, delay_ms = self.mismatch_delay.as_millis() as u64, "配对失败，等待复位");
            ClickOutcome::Mismatched
        }
    }

    /// 到期后执行排定的复位，返回是否真正翻回了牌
    ///
    /// 复位属于更早的一局时只清掉它，不碰当前牌面。
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.due => {
                self.pending = None;
                self.apply_reset(pending)
            }
            _ => false,
        }
    }

    fn apply_reset(&mut self, pending: PendingReset) -> bool {
        if pending.epoch != self.epoch {
            debug!(stale = pending.epoch, current = self.epoch, "丢弃过期的复位");
            return false;
        }
        // 按 id 重新取牌
        for id in pending.ids {
            if let Some(card) = self.card_mut(id) {
                if !card.is_matched {
                    card.is_flipped = false;
                }
            }
        }
        self.selected.clear();
        self.locked = false;
        debug!(ids = ?pending.ids, "已翻回");
        true
    }

    /// 距离复位到期的剩余时间
    pub fn time_until_pending(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_IMAGES;
    use proptest::prelude::*;
    use std::collections::HashMap;

    const DELAY: Duration = Duration::from_millis(1000);

    fn new_game(seed: u64) -> GameController {
        let images = DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect();
        GameController::new(images, DELAY, seed)
    }

    /// 找一对相同图片和一对不同图片的 id
    fn matching_pair(game: &GameController) -> (CardId, CardId) {
        let first = &game.cards()[0];
        let second = game
            .cards()
            .iter()
            .find(|c| c.id != first.id && c.image_url == first.image_url)
            .unwrap();
        (first.id, second.id)
    }

    fn mismatching_pair(game: &GameController) -> (CardId, CardId) {
        let mut open = game.cards().iter().filter(|c| !c.is_matched);
        let first = open.next().unwrap();
        let second = open.find(|c| c.image_url != first.image_url).unwrap();
        (first.id, second.id)
    }

    fn assert_invariants(game: &GameController) {
        assert!(game.selected().len() <= 2);
        let pending_up = game
            .cards()
            .iter()
            .filter(|c| c.is_flipped && !c.is_matched)
            .count();
        assert!(pending_up <= 2);
        assert!(game.cards().iter().all(|c| !c.is_matched || c.is_flipped));
    }

    #[test]
    fn test_initialize_deck() {
        let game = new_game(7);
        assert_eq!(game.cards().len(), 16);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in game.cards() {
            *counts.entry(card.image_url.as_str()).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
        assert_eq!(game.phase(), Phase::Idle);
        assert!(!game.is_locked());
        assert_eq!(game.epoch(), 1);
    }

    #[test]
    fn test_same_seed_same_deal() {
        assert_eq!(new_game(42).cards(), new_game(42).cards());
    }

    #[test]
    fn test_single_click_flips() {
        let mut game = new_game(1);
        let now = Instant::now();
        let id = game.cards()[5].id;

        assert_eq!(game.handle_card_click(id, now), ClickOutcome::Flipped);
        assert!(game.card(id).unwrap().is_flipped);
        assert_eq!(game.selected(), &[id]);
        assert_eq!(game.phase(), Phase::OneSelected);

        assert_eq!(
            game.handle_card_click(id, now),
            ClickOutcome::Ignored(IgnoreReason::AlreadySelected)
        );
        assert_eq!(game.selected(), &[id]);
    }

    #[test]
    fn test_unknown_card_ignored() {
        let mut game = new_game(1);
        let before = game.cards().to_vec();
        assert_eq!(
            game.handle_card_click(99, Instant::now()),
            ClickOutcome::Ignored(IgnoreReason::UnknownCard)
        );
        assert_eq!(game.cards(), before.as_slice());
        assert!(game.selected().is_empty());
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut game = new_game(3);
        let now = Instant::now();
        let (a, b) = matching_pair(&game);

        game.handle_card_click(a, now);
        assert_eq!(game.handle_card_click(b, now), ClickOutcome::Matched);

        assert!(game.card(a).unwrap().is_matched);
        assert!(game.card(b).unwrap().is_matched);
        assert!(game.selected().is_empty());
        assert!(!game.is_locked());
        assert!(game.pending().is_none());
        assert_eq!(game.matched_pairs(), 1);

        // 已配对的牌再点无效
        let before = game.cards().to_vec();
        assert_eq!(
            game.handle_card_click(a, now),
            ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );
        assert_eq!(game.cards(), before.as_slice());
    }

    #[test]
    fn test_mismatch_waits_for_delay() {
        let mut game = new_game(5);
        let start = Instant::now();
        let (a, b) = mismatching_pair(&game);

        game.handle_card_click(a, start);
        assert_eq!(game.handle_card_click(b, start), ClickOutcome::Mismatched);
        assert!(game.is_locked());
        assert_eq!(game.phase(), Phase::Comparing);
        assert_eq!(game.time_until_pending(start), Some(DELAY));

        // 锁定期间点击无效
        let other = game
            .cards()
            .iter()
            .find(|c| c.id != a && c.id != b)
            .unwrap()
            .id;
        let before = game.cards().to_vec();
        assert_eq!(
            game.handle_card_click(other, start + Duration::from_millis(500)),
            ClickOutcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(game.cards(), before.as_slice());

        assert!(!game.tick(start + Duration::from_millis(999)));
        assert!(game.card(a).unwrap().is_flipped);
        assert!(game.card(b).unwrap().is_flipped);

        assert!(game.tick(start + DELAY));
        assert!(!game.card(a).unwrap().is_flipped);
        assert!(!game.card(b).unwrap().is_flipped);
        assert!(game.selected().is_empty());
        assert!(!game.is_locked());
        assert!(game.pending().is_none());
        assert!(!game.tick(start + DELAY * 2));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = new_game(9);
        let now = Instant::now();
        let (a, b) = matching_pair(&game);
        game.handle_card_click(a, now);
        game.handle_card_click(b, now);
        let (c, d) = mismatching_pair(&game);
        game.handle_card_click(c, now);
        game.handle_card_click(d, now);

        game.restart();
        assert_eq!(game.epoch(), 2);
        assert_eq!(game.cards().len(), 16);
        assert!(game.cards().iter().all(|c| !c.is_flipped && !c.is_matched));
        assert!(game.selected().is_empty());
        assert!(!game.is_locked());
        // 上一局的复位仍在，但纪元已过期
        assert!(game.pending().is_some_and(|p| p.epoch == 1));
    }

    #[test]
    fn test_stale_reset_ignored_after_restart() {
        let mut game = new_game(11);
        let start = Instant::now();
        let (a, b) = mismatching_pair(&game);
        game.handle_card_click(a, start);
        game.handle_card_click(b, start);

        game.restart();
        // 新一局里翻开一张同 id 的牌
        assert_eq!(game.handle_card_click(a, start), ClickOutcome::Flipped);

        assert!(!game.tick(start + DELAY));
        assert!(game.pending().is_none());
        assert!(game.card(a).unwrap().is_flipped);
        assert_eq!(game.selected(), &[a]);
        assert_eq!(game.phase(), Phase::OneSelected);
    }

    #[test]
    fn test_new_mismatch_replaces_stale_reset() {
        let mut game = new_game(12);
        let start = Instant::now();
        let (a, b) = mismatching_pair(&game);
        game.handle_card_click(a, start);
        game.handle_card_click(b, start);

        game.restart();
        let later = start + Duration::from_millis(300);
        let (c, d) = mismatching_pair(&game);
        game.handle_card_click(c, later);
        assert_eq!(game.handle_card_click(d, later), ClickOutcome::Mismatched);
        assert_eq!(game.pending().unwrap().epoch, 2);

        // 旧的到期时间已被覆盖
        assert!(!game.tick(start + DELAY));
        assert!(game.is_locked());
        assert!(game.tick(later + DELAY));
        assert!(!game.card(c).unwrap().is_flipped);
        assert!(!game.card(d).unwrap().is_flipped);
        assert!(!game.is_locked());
    }

    #[test]
    fn test_complete_game() {
        let mut game = new_game(13);
        let now = Instant::now();
        let mut by_image: HashMap<String, Vec<CardId>> = HashMap::new();
        for card in game.cards() {
            by_image.entry(card.image_url.clone()).or_default().push(card.id);
        }
        for ids in by_image.values() {
            assert!(!game.is_complete());
            game.handle_card_click(ids[0], now);
            assert_eq!(game.handle_card_click(ids[1], now), ClickOutcome::Matched);
        }
        assert!(game.is_complete());
        assert_eq!(game.matched_pairs(), game.total_pairs());
    }

    proptest! {
        #[test]
        fn clicks_keep_invariants(
            seed in any::<u64>(),
            steps in prop::collection::vec((0u32..18, 0u64..1500), 1..80),
        ) {
            let mut game = new_game(seed);
            let mut now = Instant::now();
            for (id, advance_ms) in steps {
                now += Duration::from_millis(advance_ms);
                game.tick(now);

                let before = game.cards().to_vec();
                let was_full = game.selected().len() == 2;
                let outcome = game.handle_card_click(id, now);
                if was_full {
                    prop_assert!(matches!(outcome, ClickOutcome::Ignored(_)));
                }
                if let ClickOutcome::Ignored(_) = outcome {
                    prop_assert_eq!(game.cards(), before.as_slice());
                }
                assert_invariants(&game);
            }
        }
    }
}

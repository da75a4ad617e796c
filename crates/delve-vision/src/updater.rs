//! The per-turn visibility update.
//!
//! Run once per player move, in order:
//!
//! 1. shift current flags into their `WAS_*` shadows;
//! 2. cast the player's field of view and mark `IN_FIELD_OF_VIEW`; the
//!    player's own cell is always in view and visible;
//! 3. apply clairvoyance, then telepathy;
//! 4. mark lit, undarkened cells in view `VISIBLE`;
//! 5. fire one transition per cell: discover, store memories, or refresh.

use delve_core::{
    CellFlags, ConfigError, CreatureQuery, ItemFlags, LightingQuery, MessageColor, Pos,
    TerrainFlags, TerrainMechFlags, TerrainQuery, VisibilityFlags, VisionConfig, VisionEffects,
    FP_FACTOR,
};
use tracing::debug;

use crate::fov::{FovCaster, FovQuery, ShadowcastFov};
use crate::state::VisionState;

/// Everything a visibility update reads from and writes to.
pub trait VisionHost: TerrainQuery + CreatureQuery + LightingQuery + VisionEffects {}

impl<T: TerrainQuery + CreatureQuery + LightingQuery + VisionEffects + ?Sized> VisionHost for T {}

/// The player-side inputs of one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Observer {
    /// The player's cell.
    pub loc: Pos,
    /// Clairvoyance level: positive reveals, negative darkens, 0 is off.
    pub clairvoyance: i16,
    /// Whether the player is hallucinating.
    pub hallucinating: bool,
    /// Whether automated exploration or travel is running.
    pub automation_active: bool,
    /// The player's turn counter.
    pub turn_number: u64,
}

impl Observer {
    /// An observer at `loc` with no special senses.
    pub fn at(loc: Pos) -> Self {
        Self {
            loc,
            ..Self::default()
        }
    }

    /// Set the clairvoyance level.
    pub fn with_clairvoyance(mut self, level: i16) -> Self {
        self.clairvoyance = level;
        self
    }

    /// Set whether the player hallucinates.
    pub fn hallucinating(mut self, yes: bool) -> Self {
        self.hallucinating = yes;
        self
    }

    /// Set whether automation is running.
    pub fn automated(mut self, yes: bool) -> Self {
        self.automation_active = yes;
        self
    }

    /// Set the turn counter.
    pub fn on_turn(mut self, turn: u64) -> Self {
        self.turn_number = turn;
        self
    }
}

/// What one update changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Cells in the player's field of view, the player's own included.
    pub in_view: usize,
    /// Cells that became visible.
    pub newly_visible: usize,
    /// Cells that stopped being visible.
    pub newly_hidden: usize,
    /// Newly visible cells that had never been discovered; each is worth
    /// exploration experience.
    pub newly_discovered: usize,
    /// Cells handed to [`VisionEffects::refresh_dungeon_cell`].
    pub refreshed: usize,
    /// Telepathically revealed creatures.
    pub telepathic: usize,
}

/// Runs the per-turn visibility update.
#[derive(Clone, Debug)]
pub struct VisibilityUpdater<F = ShadowcastFov> {
    config: VisionConfig,
    fov: F,
}

impl Default for VisibilityUpdater {
    fn default() -> Self {
        Self {
            config: VisionConfig::default(),
            fov: ShadowcastFov,
        }
    }
}

impl VisibilityUpdater {
    /// An updater with custom constants and the shadowcasting caster.
    ///
    /// Returns `Err` if `config` fails [`VisionConfig::validate`].
    pub fn new(config: VisionConfig) -> Result<Self, ConfigError> {
        Self::with_caster(config, ShadowcastFov)
    }
}

impl<F: FovCaster> VisibilityUpdater<F> {
    /// An updater using a caller-supplied field-of-view caster.
    pub fn with_caster(config: VisionConfig, fov: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, fov })
    }

    /// The constants in use.
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Bring `state` up to date for this turn.
    ///
    /// With `refresh_display` clear, every other side effect still fires
    /// but no cell is refreshed.
    pub fn update<H: VisionHost + ?Sized>(
        &self,
        state: &mut VisionState,
        host: &mut H,
        observer: &Observer,
        refresh_display: bool,
    ) -> UpdateReport {
        debug_assert_eq!(state.dims(), host.dims(), "vision state and level dims differ");
        let mut report = UpdateReport::default();
        state.demote();

        let (w, h) = state.dims();
        let radius_fp = (w + h) as i64 * FP_FACTOR;
        state.scratch.clear();
        self.fov.fov_mask(
            &*host,
            &FovQuery::new(observer.loc, radius_fp, TerrainFlags::OBSTRUCTS_VISION),
            &mut state.scratch,
        );
        state.scratch.set(observer.loc);
        report.in_view = state.mark_scratch(VisibilityFlags::IN_FIELD_OF_VIEW);
        state.insert(observer.loc, VisibilityFlags::VISIBLE);

        if observer.clairvoyance < 0 {
            host.discover_cell(observer.loc);
        }
        state.apply_clairvoyance(host, observer.loc, observer.clairvoyance, &self.config);
        report.telepathic = state.apply_telepathy(host, &self.fov, self.config.telepathy_radius);

        let dancing_turn = !observer.automation_active
            || observer.turn_number % self.config.dancing_cadence == 0;

        for pos in state.positions() {
            let flags = state.flags(pos);
            if flags.contains(VisibilityFlags::IN_FIELD_OF_VIEW)
                && !flags.contains(VisibilityFlags::CLAIRVOYANT_DARKENED)
                && host.light_at(pos).intensity() > self.config.visibility_threshold
            {
                state.insert(pos, VisibilityFlags::VISIBLE);
            }

            let refresh = self.transition(state.flags(pos), pos, host, observer, &mut report)
                || (state.is_visible(pos)
                    && (observer.hallucinating || (dancing_turn && host.color_dances(pos))));
            if refresh && refresh_display {
                host.refresh_dungeon_cell(pos);
                report.refreshed += 1;
            }
        }

        debug!(
            turn = observer.turn_number,
            in_view = report.in_view,
            newly_visible = report.newly_visible,
            newly_hidden = report.newly_hidden,
            refreshed = report.refreshed,
            "visibility updated"
        );
        report
    }

    /// Fire the side effects of the cell's first matching transition.
    /// Returns whether the cell needs a refresh.
    fn transition<H: VisionHost + ?Sized>(
        &self,
        flags: VisibilityFlags,
        pos: Pos,
        host: &mut H,
        observer: &Observer,
        report: &mut UpdateReport,
    ) -> bool {
        use VisibilityFlags as V;
        let now = |f: V| flags.contains(f);

        if now(V::VISIBLE) && !now(V::WAS_VISIBLE) {
            report.newly_visible += 1;
            if !host.cell_has_flag(pos, CellFlags::DISCOVERED) {
                report.newly_discovered += 1;
                if observer.automation_active {
                    announce(host, pos);
                }
            }
            host.discover_cell(pos);
            true
        } else if !now(V::VISIBLE) && now(V::WAS_VISIBLE) {
            report.newly_hidden += 1;
            host.store_memories(pos);
            true
        } else if !now(V::CLAIRVOYANT_VISIBLE) && now(V::WAS_CLAIRVOYANT_VISIBLE) {
            host.store_memories(pos);
            true
        } else if now(V::CLAIRVOYANT_VISIBLE) && !now(V::WAS_CLAIRVOYANT_VISIBLE) {
            true
        } else if !now(V::TELEPATHIC_VISIBLE) && now(V::WAS_TELEPATHIC_VISIBLE) {
            host.store_memories(pos);
            true
        } else if now(V::TELEPATHIC_VISIBLE) && !now(V::WAS_TELEPATHIC_VISIBLE) {
            true
        } else {
            now(V::VISIBLE) && host.light_at(pos) != host.old_light_at(pos)
        }
    }
}

/// Tell the player about a key item or an exploration-interrupting feature
/// coming into view for the first time.
fn announce<H: VisionHost + ?Sized>(host: &mut H, pos: Pos) {
    let item = host
        .item_at(pos)
        .filter(|item| item.flags.contains(ItemFlags::KEY))
        .map(|item| format!("you see {}.", item.name));
    if let Some(text) = item {
        host.message_with_color(&text, MessageColor::Item);
    }

    if host.cell_has_flag(pos, CellFlags::MAGIC_MAPPED) {
        return;
    }
    let feature = host
        .layer_description(pos, TerrainMechFlags::INTERRUPT_EXPLORATION_WHEN_SEEN)
        .map(|description| format!("you see {description}."));
    if let Some(text) = feature {
        host.message_with_color(&text, MessageColor::Background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{ItemView, Light};
    use delve_test_utils::{MockDungeon, VisionEvent};

    fn run(d: &mut MockDungeon, s: &mut VisionState, observer: Observer) -> UpdateReport {
        VisibilityUpdater::default().update(s, d, &observer, true)
    }

    // ── Field of view tests ─────────────────────────────────────

    #[test]
    fn lit_cells_in_view_become_visible() {
        let mut d = MockDungeon::standard();
        let mut s = VisionState::new();
        let r = run(&mut d, &mut s, Observer::at(Pos::new(10, 10)));
        assert!(s.is_visible(Pos::new(10, 10)));
        assert!(s.is_visible(Pos::new(70, 20)));
        assert!(s.is_visible(Pos::new(0, 0)));
        assert_eq!(r.newly_visible, s.count(VisibilityFlags::VISIBLE));
        assert_eq!(r.newly_discovered, r.newly_visible);
        assert_eq!(r.in_view, s.count(VisibilityFlags::IN_FIELD_OF_VIEW));
        assert!(d.cell_has_flag(Pos::new(70, 20), CellFlags::DISCOVERED));
    }

    #[test]
    fn dark_cells_are_in_view_but_not_visible() {
        let dark = Pos::new(20, 10);
        let mut d = MockDungeon::standard().with_light(dark, Light::new(20, 20, 10));
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(Pos::new(10, 10)));
        assert!(s.contains(dark, VisibilityFlags::IN_FIELD_OF_VIEW));
        assert!(!s.is_visible(dark));
        assert!(!d.cell_has_flag(dark, CellFlags::DISCOVERED));
    }

    #[test]
    fn player_cell_is_visible_even_in_darkness() {
        let at = Pos::new(10, 10);
        let mut d = MockDungeon::standard().with_ambient_light(Light::new(0, 0, 0));
        let mut s = VisionState::new();
        let r = run(&mut d, &mut s, Observer::at(at));
        assert!(s.is_visible(at));
        assert_eq!(r.newly_visible, 1);
    }

    // ── Transition tests ────────────────────────────────────────

    #[test]
    fn moving_behind_a_wall_hides_and_remembers() {
        let mut d = MockDungeon::standard();
        for y in 1..28 {
            d = d.with_wall(Pos::new(40, y));
        }
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(Pos::new(30, 10)));
        assert!(s.is_visible(Pos::new(35, 10)));
        d.take_events();

        let r = run(&mut d, &mut s, Observer::at(Pos::new(50, 10)));
        assert!(!s.is_visible(Pos::new(35, 10)));
        assert!(s.contains(Pos::new(35, 10), VisibilityFlags::WAS_VISIBLE));
        assert!(r.newly_hidden > 0);
        assert!(d.events().contains(&VisionEvent::StoredMemory(Pos::new(35, 10))));
        assert!(d.cell_has_flag(Pos::new(35, 10), CellFlags::STABLE_MEMORY));
    }

    #[test]
    fn steady_cells_are_left_alone() {
        let mut d = MockDungeon::standard();
        let mut s = VisionState::new();
        let o = Observer::at(Pos::new(10, 10));
        run(&mut d, &mut s, o);
        d.take_events();
        let r = run(&mut d, &mut s, o);
        assert_eq!(r.newly_visible, 0);
        assert_eq!(r.refreshed, 0);
        assert!(d.events().is_empty());
    }

    #[test]
    fn changed_light_refreshes_only() {
        let p = Pos::new(15, 10);
        let mut d = MockDungeon::standard();
        let mut s = VisionState::new();
        let o = Observer::at(Pos::new(10, 10));
        run(&mut d, &mut s, o);
        d.take_events();

        let mut d = d.with_light(p, Light::new(200, 50, 50));
        let r = run(&mut d, &mut s, o);
        assert_eq!(r.refreshed, 1);
        assert_eq!(d.take_events(), vec![VisionEvent::Refreshed(p)]);
    }

    #[test]
    fn headless_update_skips_refreshes() {
        let mut d = MockDungeon::standard();
        let mut s = VisionState::new();
        let r = VisibilityUpdater::default().update(
            &mut s,
            &mut d,
            &Observer::at(Pos::new(10, 10)),
            false,
        );
        assert_eq!(r.refreshed, 0);
        assert!(r.newly_visible > 0);
        assert_eq!(d.count_events(|e| matches!(e, VisionEvent::Refreshed(_))), 0);
        assert!(d.count_events(|e| matches!(e, VisionEvent::Discovered(_))) > 0);
    }

    // ── Dancing colour tests ────────────────────────────────────

    #[test]
    fn dancing_cells_refresh_every_turn() {
        let p = Pos::new(15, 10);
        let mut d = MockDungeon::standard().with_dancing(p);
        let mut s = VisionState::new();
        let o = Observer::at(Pos::new(10, 10));
        run(&mut d, &mut s, o);
        d.take_events();
        let r = run(&mut d, &mut s, o.on_turn(1));
        assert_eq!(r.refreshed, 1);
    }

    #[test]
    fn automation_throttles_dancing() {
        let p = Pos::new(15, 10);
        let mut d = MockDungeon::standard().with_dancing(p);
        let mut s = VisionState::new();
        let o = Observer::at(Pos::new(10, 10)).automated(true);
        run(&mut d, &mut s, o.on_turn(1));
        let refreshed: Vec<usize> = (2..=6)
            .map(|turn| run(&mut d, &mut s, o.on_turn(turn)).refreshed)
            .collect();
        assert_eq!(refreshed, vec![0, 0, 0, 1, 0]);
    }

    #[test]
    fn hallucination_refreshes_every_visible_cell() {
        let mut d = MockDungeon::open(10, 10);
        let mut s = VisionState::with_dims(10, 10).unwrap();
        let o = Observer::at(Pos::new(5, 5));
        run(&mut d, &mut s, o);
        let r = run(&mut d, &mut s, o.hallucinating(true));
        assert_eq!(r.refreshed, 100);
    }

    #[test]
    fn hallucination_ignores_the_automation_cadence() {
        let mut d = MockDungeon::open(10, 10);
        let mut s = VisionState::with_dims(10, 10).unwrap();
        let o = Observer::at(Pos::new(5, 5)).automated(true);
        run(&mut d, &mut s, o.on_turn(1));
        let r = run(&mut d, &mut s, o.on_turn(3).hallucinating(true));
        assert_eq!(r.refreshed, 100);
    }

    // ── Announcement tests ──────────────────────────────────────

    #[test]
    fn automation_announces_keys_and_features() {
        let key = Pos::new(20, 10);
        let altar = Pos::new(25, 10);
        let mut d = MockDungeon::standard()
            .with_item(key, ItemView::new("a door key", ItemFlags::KEY))
            .with_item(Pos::new(22, 10), ItemView::new("a dart", ItemFlags::empty()))
            .with_feature(
                altar,
                TerrainMechFlags::INTERRUPT_EXPLORATION_WHEN_SEEN,
                "an altar",
            );
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(Pos::new(10, 10)).automated(true));
        assert_eq!(d.messages(), vec!["you see a door key.", "you see an altar."]);
    }

    #[test]
    fn manual_play_is_silent() {
        let mut d = MockDungeon::standard().with_item(
            Pos::new(20, 10),
            ItemView::new("a door key", ItemFlags::KEY),
        );
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(Pos::new(10, 10)));
        assert!(d.messages().is_empty());
    }

    #[test]
    fn magic_mapped_features_are_not_announced() {
        let altar = Pos::new(25, 10);
        let mut d = MockDungeon::standard()
            .with_feature(altar, TerrainMechFlags::INTERRUPT_EXPLORATION_WHEN_SEEN, "an altar")
            .with_cell_flags(altar, CellFlags::MAGIC_MAPPED);
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(Pos::new(10, 10)).automated(true));
        assert!(d.messages().is_empty());
    }

    // ── Clairvoyance and telepathy tests ────────────────────────

    #[test]
    fn cursed_clairvoyance_darkens_but_player_still_sees_own_cell() {
        let at = Pos::new(10, 10);
        let mut d = MockDungeon::standard();
        let mut s = VisionState::new();
        run(&mut d, &mut s, Observer::at(at).with_clairvoyance(-1));
        assert!(s.is_visible(at));
        assert!(!s.is_visible(Pos::new(11, 10)));
        assert!(s.is_visible(Pos::new(13, 10)));
    }

    #[test]
    fn clairvoyance_ending_stores_memories() {
        let mut d = MockDungeon::standard();
        for y in 1..28 {
            d = d.with_wall(Pos::new(15, y));
        }
        let behind = Pos::new(18, 10);
        let mut s = VisionState::new();
        let o = Observer::at(Pos::new(10, 10));
        run(&mut d, &mut s, o.with_clairvoyance(1));
        assert!(s.contains(behind, VisibilityFlags::CLAIRVOYANT_VISIBLE));
        assert!(!s.is_visible(behind));
        d.take_events();

        run(&mut d, &mut s, o);
        assert!(s.contains(behind, VisibilityFlags::WAS_CLAIRVOYANT_VISIBLE));
        assert!(d.events().contains(&VisionEvent::StoredMemory(behind)));
    }

    #[test]
    fn telepathy_is_reported() {
        let mut d = MockDungeon::standard().with_creature(
            delve_core::CreatureView::new(
                delve_core::CreatureId(1),
                Pos::new(60, 20),
                delve_core::CreatureState::Hostile,
            )
            .with_telepathy(true),
        );
        let mut s = VisionState::new();
        let r = run(&mut d, &mut s, Observer::at(Pos::new(10, 10)));
        assert_eq!(r.telepathic, 1);
        assert!(s.contains(Pos::new(60, 20), VisibilityFlags::TELEPATHIC_VISIBLE));
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = VisionConfig {
            dancing_cadence: 0,
            ..VisionConfig::default()
        };
        assert!(VisibilityUpdater::new(bad).is_err());
    }
}

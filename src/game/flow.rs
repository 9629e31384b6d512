//! Game flow state machine (spec §4.10): drives a [`Game`] from the
//! opening coin toss to the final whistle through nineteen named states,
//! invoking the decision engines, play executors, rule providers, and the
//! penalty mechanic in the order spec §4.11's event checks demand.
//!
//! Mirrors the teacher's `DriveSimulator`/`GameSimulator` loop — derive
//! outcome flags from a finished play, mutate the owned aggregate in
//! place, hand back the next state — generalized from a single drive to
//! the full state machine.

use crate::attributes::Position;
use crate::error::EngineError;
use crate::game::clock::Quarter;
use crate::game::context::GameContext;
use crate::game::decision::conversion::{self, ConversionCall};
use crate::game::decision::fourth_down::{self, FourthDownDecision};
use crate::game::decision::onside::{self, OnsideDecision};
use crate::game::decision::penalty_accept::{self, AcceptDecision, PlayOutcomeSummary};
use crate::game::decision::play_call::{self, PlayCall};
use crate::game::decision::timeout;
use crate::game::event_checks::{
    half_expire_check, overtime_score_check, quarter_expire_check, score_check,
    two_minute_warning_check,
};
use crate::game::overtime::OvertimeState;
use crate::game::play::executors::{fieldgoal, kickoff, pass, punt, run};
use crate::game::play::penalty::{self, EnforcementResult, Penalty};
use crate::game::play::{PassPlay, Play, PlayCommon, PlaySegment, PlayerId, RunDirection, RunPlay};
use crate::game::rules::end_of_half::EndOfHalfProvider;
use crate::game::rules::overtime::{NextPossessionAction, OvertimeProvider, PossessionEndReason};
use crate::game::rules::two_minute_warning::TwoMinuteWarningProvider;
use crate::game::rules::{end_of_half, overtime, two_minute_warning};
use crate::game::score::ScoreResult;
use crate::game::stats::StatLedger;
use crate::game::{Down, Game, Possession};
use crate::power;
use crate::rng::RandomSource;
use crate::team::roster::{DepthChartUnit, Roster};
use crate::team::Team;

/// The nineteen states a game passes through (spec §4.10). Overtime states
/// mirror their regulation counterparts rather than duplicating logic —
/// the handlers are shared, parameterized by `in_overtime`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum GameFlowState {
    PreGame,
    CoinToss,
    Kickoff,
    PrePlay,
    Snap,
    PlayRun,
    PlayPass,
    PlayFieldGoal,
    PlayPunt,
    PostPlay,
    QuarterExpired,
    Halftime,
    EndOfRegulation,
    OvertimeCoinToss,
    OvertimeKickoff,
    OvertimePrePlay,
    OvertimeSnap,
    OvertimePlay,
    OvertimePostPlay,
    PostGame,
}

/// What `PrePlay` decided and `Snap` must carry out. Not part of the
/// public state enum — the `Play-*` states already name which kind ran.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum PlayKind {
    Run,
    Pass,
    FieldGoal,
    Punt,
    Kneel,
    Spike,
}

/// Drives a single game from kickoff to final whistle (spec §4.10).
pub struct Flow<'a> {
    config: crate::config::Configuration,
    home: &'a Team,
    away: &'a Team,
    game: Game,
    stats: StatLedger,
    overtime_provider: &'static dyn OvertimeProvider,
    two_minute_warning_provider: &'static dyn TwoMinuteWarningProvider,
    end_of_half_provider: &'static dyn EndOfHalfProvider,
    next_play_kind: Option<PlayKind>,
    kicking_team: Possession,
}

impl<'a> Flow<'a> {
    pub fn new(home: &'a Team, away: &'a Team, config: crate::config::Configuration) -> Flow<'a> {
        let overtime_provider = overtime::lookup(config.overtime_rules());
        let two_minute_warning_provider = two_minute_warning::lookup(config.two_minute_warning_rules());
        let end_of_half_provider = end_of_half::lookup(config.end_of_half_rules());
        Flow {
            config,
            home,
            away,
            game: Game::new(),
            stats: StatLedger::new(),
            overtime_provider,
            two_minute_warning_provider,
            end_of_half_provider,
            next_play_kind: None,
            kicking_team: Possession::None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn stats(&self) -> &StatLedger {
        &self.stats
    }

    pub fn into_game_and_stats(self) -> (Game, StatLedger) {
        (self.game, self.stats)
    }

    fn team(&self, possession: Possession) -> &'a Team {
        match possession {
            Possession::Home => self.home,
            Possession::Away => self.away,
            Possession::None => panic!("no team is associated with Possession::None"),
        }
    }

    /// Run the state machine to completion.
    pub fn run(&mut self, rng: &mut dyn RandomSource) -> Result<(), EngineError> {
        let mut state = GameFlowState::PreGame;
        loop {
            state = self.step(state, rng)?;
            if state == GameFlowState::PostGame {
                return Ok(());
            }
        }
    }

    fn step(&mut self, state: GameFlowState, rng: &mut dyn RandomSource) -> Result<GameFlowState, EngineError> {
        match state {
            GameFlowState::PreGame => self.pre_game(),
            GameFlowState::CoinToss => self.coin_toss(rng),
            GameFlowState::Kickoff => self.kickoff_state(rng, false),
            GameFlowState::PrePlay => self.pre_play(rng, false),
            GameFlowState::Snap => self.snap(rng, false),
            GameFlowState::PlayRun
            | GameFlowState::PlayPass
            | GameFlowState::PlayFieldGoal
            | GameFlowState::PlayPunt
            | GameFlowState::PostPlay => self.post_play(rng, false),
            GameFlowState::QuarterExpired => self.quarter_expired(),
            GameFlowState::Halftime => self.halftime(),
            GameFlowState::EndOfRegulation => self.end_of_regulation(),
            GameFlowState::OvertimeCoinToss => self.overtime_coin_toss(rng),
            GameFlowState::OvertimeKickoff => self.kickoff_state(rng, true),
            GameFlowState::OvertimePrePlay => self.pre_play(rng, true),
            GameFlowState::OvertimeSnap => self.snap(rng, true),
            GameFlowState::OvertimePlay | GameFlowState::OvertimePostPlay => self.post_play(rng, true),
            GameFlowState::PostGame => Ok(GameFlowState::PostGame),
        }
    }

    fn pre_game(&mut self) -> Result<GameFlowState, EngineError> {
        Ok(GameFlowState::CoinToss)
    }

    fn coin_toss(&mut self, rng: &mut dyn RandomSource) -> Result<GameFlowState, EngineError> {
        let winner = if rng.integer("coin_toss_winner", 0, 2)? == 0 {
            Possession::Home
        } else {
            Possession::Away
        };
        let defer = rng.chance("coin_toss_defer", 0.95)?;
        self.game.set_coin_toss(winner, defer);
        // A winner who defers elects to kick now and receive to open the
        // second half; a winner who takes the ball kicks nothing yet.
        self.kicking_team = if defer { winner } else { winner.opponent() };
        Ok(GameFlowState::Kickoff)
    }

    fn kickoff_state(&mut self, rng: &mut dyn RandomSource, in_overtime: bool) -> Result<GameFlowState, EngineError> {
        let kicking = self.kicking_team;
        let receiving = kicking.opponent();

        let score_diff = match kicking {
            Possession::Home => self.game.home_score() as i32 - self.game.away_score() as i32,
            Possession::Away => self.game.away_score() as i32 - self.game.home_score() as i32,
            Possession::None => 0,
        };
        let onside_decision = if in_overtime {
            OnsideDecision::Normal
        } else {
            onside::decide(rng, score_diff, self.config.onside_kick_attempt_probability())?
        };
        let onside_attempt = matches!(onside_decision, OnsideDecision::Onside);

        let kicking_roster = self.team(kicking).roster();
        let receiving_roster = self.team(receiving).roster();

        let kicker_idx = starter_index(kicking_roster, DepthChartUnit::KickoffCoverage, Position::K)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("kickoff"),
                role: String::from("kicker"),
            })?;
        let kicker = kicking_roster.player(kicker_idx).expect("starter index is valid");

        let returner_idx = starter_index(receiving_roster, DepthChartUnit::KickoffReturn, Position::Rb)
            .or_else(|| starter_index(receiving_roster, DepthChartUnit::KickoffReturn, Position::Wr))
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("kickoff"),
                role: String::from("returner"),
            })?;
        let returner = receiving_roster.player(returner_idx).expect("starter index is valid");

        let coverage_team: Vec<(PlayerId, f64)> = active_indices(kicking_roster, DepthChartUnit::KickoffCoverage)
            .into_iter()
            .map(|i| {
                let skill = kicking_roster.player(i).map(|p| p.skill().tackling() as f64).unwrap_or(50.0);
                (player_id(kicking, i), skill)
            })
            .collect();

        let touchback_spot = match receiving {
            Possession::Home => 25,
            _ => 75,
        };
        let field_position = match kicking {
            Possession::Home => 35,
            _ => 65,
        };

        let offensive_players = active_indices(kicking_roster, DepthChartUnit::KickoffCoverage)
            .into_iter()
            .map(|i| player_id(kicking, i))
            .collect();
        let defensive_players = active_indices(receiving_roster, DepthChartUnit::KickoffReturn)
            .into_iter()
            .map(|i| player_id(receiving, i))
            .collect();

        let inputs = kickoff::KickoffInputs {
            kicker: player_id(kicking, kicker_idx),
            kicking: kicker.skill().kicking() as f64,
            returner: player_id(receiving, returner_idx),
            returner_speed: returner.physical().speed() as f64,
            returner_agility: returner.physical().agility() as f64,
            returner_catching: returner.skill().catching() as f64,
            onside_attempt,
            touchback_spot,
            possession: kicking,
            field_position,
            coverage_team,
            offensive_players,
            defensive_players,
        };

        let mut play = Play::Kickoff(kickoff::execute(rng, inputs)?);
        annotate_scoring(&mut play);
        let touchdown = play.common().touchdown;
        let snap_team = play.common().possession_at_snap;

        let finished = self.finish_play(rng, play)?;
        self.apply_kick_result(&finished)?;

        if touchdown {
            let scoring_team = snap_team.opponent();
            score_check(&mut self.game, &finished);
            self.run_conversion(rng, scoring_team)?;
            if in_overtime {
                let provider = self.overtime_provider;
                let ends = {
                    let state = self.game.overtime_mut().expect("overtime active");
                    overtime_score_check(state, provider, scoring_team, ScoreResult::Touchdown)
                };
                if ends {
                    return Ok(GameFlowState::PostGame);
                }
                self.kicking_team = scoring_team;
                return Ok(GameFlowState::OvertimeKickoff);
            }
            self.kicking_team = scoring_team;
            return Ok(GameFlowState::Kickoff);
        }

        Ok(if in_overtime {
            GameFlowState::OvertimePrePlay
        } else {
            GameFlowState::PrePlay
        })
    }

    fn pre_play(&mut self, rng: &mut dyn RandomSource, in_overtime: bool) -> Result<GameFlowState, EngineError> {
        let offense = self.game.possession();
        let defense = offense.opponent();
        let ctx = GameContext::from_game(&self.game, offense);

        let play_clock = rng.integer("play_clock_seconds", 1, 40)? as u32;
        if timeout::decide_delay_of_game(rng, self.game.timeouts(offense), play_clock)?
            == timeout::TimeoutDecision::CallTimeout
        {
            self.game.use_timeout(offense);
        }

        let kind = if matches!(self.game.down(), Down::Fourth) {
            match fourth_down::decide(rng, &ctx)? {
                FourthDownDecision::GoForIt => {
                    match play_call::decide(rng, &ctx, self.team(offense).coach(), true)? {
                        PlayCall::Run => PlayKind::Run,
                        _ => PlayKind::Pass,
                    }
                }
                FourthDownDecision::FieldGoal => {
                    let distance = ctx.yards_to_touchdown() + 17;
                    if timeout::decide_ice_the_kicker(rng, self.game.timeouts(defense), Some(distance))?
                        == timeout::TimeoutDecision::CallTimeout
                    {
                        self.game.use_timeout(defense);
                    }
                    PlayKind::FieldGoal
                }
                FourthDownDecision::Punt => PlayKind::Punt,
            }
        } else {
            match play_call::decide(rng, &ctx, self.team(offense).coach(), true)? {
                PlayCall::Kneel => PlayKind::Kneel,
                PlayCall::Spike => PlayKind::Spike,
                PlayCall::Run => PlayKind::Run,
                PlayCall::Pass => PlayKind::Pass,
            }
        };

        self.next_play_kind = Some(kind);
        Ok(if in_overtime { GameFlowState::OvertimeSnap } else { GameFlowState::Snap })
    }

    fn snap(&mut self, rng: &mut dyn RandomSource, in_overtime: bool) -> Result<GameFlowState, EngineError> {
        let offense = self.game.possession();
        let defense = offense.opponent();
        let kind = self.next_play_kind.take().expect("pre_play always sets next_play_kind");

        let (mut play, next_state) = match kind {
            PlayKind::Run => (self.execute_run(rng, offense, defense)?, GameFlowState::PlayRun),
            PlayKind::Pass => (self.execute_pass(rng, offense, defense)?, GameFlowState::PlayPass),
            PlayKind::FieldGoal => (self.execute_fieldgoal(rng, offense, defense)?, GameFlowState::PlayFieldGoal),
            PlayKind::Punt => (self.execute_punt(rng, offense, defense)?, GameFlowState::PlayPunt),
            PlayKind::Kneel => (self.execute_kneel(offense)?, GameFlowState::PlayRun),
            PlayKind::Spike => (self.execute_spike(offense)?, GameFlowState::PlayPass),
        };

        annotate_scoring(&mut play);
        self.game.set_current_play(Some(play));

        Ok(if in_overtime { GameFlowState::OvertimePlay } else { next_state })
    }

    fn post_play(&mut self, rng: &mut dyn RandomSource, in_overtime: bool) -> Result<GameFlowState, EngineError> {
        let raw_play = self.game.current_play().cloned().expect("snap always sets current_play");
        let snap_offense = raw_play.common().possession_at_snap;

        let enforcement = self.apply_post_play_penalties(&raw_play)?;
        let offense_foul_accepted = enforcement.net_yards < 0;
        let play_negated = enforcement.dead_ball
            || enforcement.offsetting
            || (raw_play.common().touchdown && offense_foul_accepted);

        let possession_turned_over = match &raw_play {
            Play::Kickoff(_) | Play::Punt(_) => {
                self.apply_kick_result(&raw_play)?;
                raw_play.common().possession_changed
            }
            Play::FieldGoal(fg) => {
                self.apply_fieldgoal_result(snap_offense, fg)?;
                !fg.made
            }
            Play::Run(_) | Play::Pass(_) => self.advance_down_and_possession(&raw_play, &enforcement)?,
        };

        if !play_negated {
            score_check(&mut self.game, &raw_play);
        }

        let touchdown = !play_negated && raw_play.common().touchdown;
        let field_goal_made = matches!(&raw_play, Play::FieldGoal(fg) if fg.made);
        let safety = raw_play.common().safety;

        let finished = self.finish_play(rng, raw_play)?;

        if in_overtime {
            return self.overtime_post_play(rng, &finished, snap_offense, touchdown, field_goal_made, safety, possession_turned_over);
        }

        let elapsed = finished.common().elapsed_seconds;
        let quarter_result = quarter_expire_check(&mut self.game, elapsed);
        let _ = two_minute_warning_check(&mut self.game, self.two_minute_warning_provider, &quarter_result);

        if !finished.common().clock_stopped {
            let trailing_ctx = GameContext::from_game(&self.game, snap_offense);
            if timeout::decide_stop_clock(rng, &trailing_ctx, true)? == timeout::TimeoutDecision::CallTimeout {
                self.game.use_timeout(snap_offense);
            }
        }

        if touchdown {
            self.run_conversion(rng, snap_offense)?;
            self.kicking_team = snap_offense;
            return Ok(GameFlowState::Kickoff);
        }
        if field_goal_made {
            self.kicking_team = snap_offense;
            return Ok(GameFlowState::Kickoff);
        }
        if safety {
            self.kicking_team = snap_offense.opponent();
            return Ok(GameFlowState::Kickoff);
        }

        if quarter_result.quarter_expired {
            match quarter_result.quarter {
                Quarter::Second => {
                    if half_expire_check(&quarter_result, &finished, self.end_of_half_provider) {
                        return Ok(GameFlowState::PrePlay);
                    }
                    return Ok(GameFlowState::Halftime);
                }
                Quarter::Fourth => return Ok(GameFlowState::QuarterExpired),
                _ => {}
            }
        }

        Ok(GameFlowState::PrePlay)
    }

    fn quarter_expired(&mut self) -> Result<GameFlowState, EngineError> {
        if self.game.score_tied() {
            Ok(GameFlowState::OvertimeCoinToss)
        } else {
            Ok(GameFlowState::EndOfRegulation)
        }
    }

    fn end_of_regulation(&mut self) -> Result<GameFlowState, EngineError> {
        log::info!(
            "regulation ends {}-{}",
            self.game.home_score(),
            self.game.away_score()
        );
        Ok(GameFlowState::PostGame)
    }

    fn halftime(&mut self) -> Result<GameFlowState, EngineError> {
        self.game.reset_timeouts(self.config.starting_timeouts());
        self.game.time_mut().advance_quarter();
        let winner = self.game.coin_toss_winner();
        let deferred = self.game.coin_toss_deferred();
        let opening_receiver = if deferred { winner.opponent() } else { winner };
        self.kicking_team = opening_receiver;
        self.game.set_possession(Possession::None);
        Ok(GameFlowState::Kickoff)
    }

    fn overtime_coin_toss(&mut self, rng: &mut dyn RandomSource) -> Result<GameFlowState, EngineError> {
        self.game.reset_timeouts(self.overtime_provider.timeouts_per_team());
        if self.game.overtime().is_none() {
            let winner = if rng.integer("overtime_coin_toss_winner", 0, 2)? == 0 {
                Possession::Home
            } else {
                Possession::Away
            };
            self.game.start_overtime(OvertimeState::new(winner, winner));
            self.kicking_team = winner.opponent();
        } else {
            // A later period's receiver is already decided by the
            // alternation `OvertimeState::start_next_period` applied —
            // there is no fresh coin toss to flip.
            let receiver = self.game.overtime().expect("checked Some above").first_possession_team();
            self.kicking_team = receiver.opponent();
        }
        Ok(GameFlowState::OvertimeKickoff)
    }

    #[allow(clippy::too_many_arguments)]
    fn overtime_post_play(
        &mut self,
        rng: &mut dyn RandomSource,
        finished: &Play,
        snap_offense: Possession,
        touchdown: bool,
        field_goal_made: bool,
        safety: bool,
        possession_turned_over: bool,
    ) -> Result<GameFlowState, EngineError> {
        let drive_ended = touchdown || field_goal_made || safety || possession_turned_over;
        if !drive_ended {
            return Ok(GameFlowState::OvertimePrePlay);
        }

        let (scoring_team, score_result) = if touchdown {
            (snap_offense, ScoreResult::Touchdown)
        } else if field_goal_made {
            (snap_offense, ScoreResult::FieldGoal)
        } else if safety {
            (snap_offense.opponent(), ScoreResult::Safety)
        } else {
            (snap_offense, ScoreResult::None)
        };

        if touchdown {
            self.run_conversion(rng, snap_offense)?;
        }

        let reason = if touchdown {
            PossessionEndReason::Touchdown
        } else if field_goal_made {
            PossessionEndReason::FieldGoal
        } else if safety {
            PossessionEndReason::Safety
        } else if matches!(finished.common().down, Down::Fourth) {
            PossessionEndReason::TurnoverOnDowns
        } else {
            PossessionEndReason::Turnover
        };

        let provider = self.overtime_provider;
        let ends = {
            let state = self.game.overtime_mut().expect("overtime_post_play requires active overtime");
            overtime_score_check(state, provider, scoring_team, score_result)
        };
        if ends {
            return Ok(GameFlowState::PostGame);
        }

        let snapshot = self.game.overtime().expect("overtime active").clone();
        match provider.next_possession_action(&snapshot, reason) {
            NextPossessionAction::GameOver => Ok(GameFlowState::PostGame),
            NextPossessionAction::NewPeriod => {
                let max_periods = provider.max_periods();
                if max_periods != 0 && snapshot.period() >= max_periods {
                    Ok(GameFlowState::PostGame)
                } else {
                    self.game.overtime_mut().expect("overtime active").start_next_period();
                    Ok(GameFlowState::OvertimeCoinToss)
                }
            }
            NextPossessionAction::OtherTeamPossesses => {
                self.kicking_team = scoring_team;
                Ok(GameFlowState::OvertimeKickoff)
            }
        }
    }

    fn run_conversion(&mut self, rng: &mut dyn RandomSource, scoring_team: Possession) -> Result<(), EngineError> {
        if let Some(state) = self.game.overtime() {
            if self.overtime_provider.is_two_point_conversion_required(state) {
                return self.execute_two_point(rng, scoring_team);
            }
        }

        let ctx = GameContext::from_game(&self.game, scoring_team);
        match conversion::decide(rng, &ctx)? {
            ConversionCall::ExtraPoint => self.execute_extra_point(rng, scoring_team),
            ConversionCall::TwoPointConversion => self.execute_two_point(rng, scoring_team),
        }
    }

    fn execute_extra_point(&mut self, rng: &mut dyn RandomSource, offense: Possession) -> Result<(), EngineError> {
        let defense = offense.opponent();
        let offense_roster = self.team(offense).roster();
        let defense_roster = self.team(defense).roster();

        let kicker_idx = starter_index(offense_roster, DepthChartUnit::FieldGoal, Position::K)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("extra_point"),
                role: String::from("kicker"),
            })?;
        let kicker = offense_roster.player(kicker_idx).expect("starter index is valid");

        let block_lineup = offense_roster.lineup(DepthChartUnit::FieldGoal);
        let rush_lineup = defense_roster.lineup(DepthChartUnit::FieldGoalBlock);
        let block_power = power::pass_blocking_power(&block_lineup);
        let rush_power = power::pass_rush_power(&rush_lineup);

        // offense-relative: the kicking offense's own distance from their
        // goal at the standard PAT spot, regardless of which team it is.
        let field_position = 85;
        let offensive_players = active_indices(offense_roster, DepthChartUnit::FieldGoal)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defensive_players = active_indices(defense_roster, DepthChartUnit::FieldGoalBlock)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let inputs = fieldgoal::FieldGoalInputs {
            kicker: player_id(offense, kicker_idx),
            kicking: kicker.skill().kicking() as f64,
            distance: 33,
            block_power,
            rush_power,
            possession: offense,
            field_position,
            offensive_players,
            defensive_players,
        };

        let play = Play::FieldGoal(fieldgoal::execute(rng, inputs)?);
        let made = matches!(&play, Play::FieldGoal(fg) if fg.made);
        self.finish_play(rng, play)?;
        if made {
            crate::game::score::apply_score(&mut self.game, offense, ScoreResult::ExtraPoint);
        }
        Ok(())
    }

    fn execute_two_point(&mut self, rng: &mut dyn RandomSource, offense: Possession) -> Result<(), EngineError> {
        let defense = offense.opponent();
        let field_position = match offense {
            Possession::Home => 98,
            _ => 2,
        };
        let saved_field_position = self.game.field_position();
        let saved_down = self.game.down();
        let saved_yards_to_go = self.game.yards_to_go();
        self.game.set_field_position(field_position)?;
        self.game.set_down(Down::First);
        self.game.set_yards_to_go(2);

        let run_pass_lean = self.team(offense).coach().run_pass();
        let mut play = if run_pass_lean >= 50 {
            self.execute_run(rng, offense, defense)?
        } else {
            self.execute_pass(rng, offense, defense)?
        };
        annotate_scoring(&mut play);
        let converted = play.common().touchdown;
        self.finish_play(rng, play)?;

        self.game.set_field_position(saved_field_position)?;
        self.game.set_down(saved_down);
        self.game.set_yards_to_go(saved_yards_to_go);

        if converted {
            crate::game::score::apply_score(&mut self.game, offense, ScoreResult::TwoPointConversion);
        }
        Ok(())
    }

    fn execute_run(&mut self, rng: &mut dyn RandomSource, offense: Possession, defense: Possession) -> Result<Play, EngineError> {
        let offense_roster = self.team(offense).roster();
        let defense_roster = self.team(defense).roster();

        let carrier_idx = starter_index(offense_roster, DepthChartUnit::Offense, Position::Rb)
            .or_else(|| starter_index(offense_roster, DepthChartUnit::Offense, Position::Fb))
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("run"),
                role: String::from("carrier"),
            })?;
        let carrier = offense_roster.player(carrier_idx).expect("starter index is valid");

        let offense_lineup = offense_roster.lineup(DepthChartUnit::Offense);
        let defense_lineup = defense_roster.lineup(DepthChartUnit::Defense);
        let run_block_power = power::run_blocking_power(&offense_lineup);
        let run_defense_power = power::run_defense_power(&defense_lineup);
        let defense_awareness = power::lineup_awareness(&defense_lineup);

        let tacklers: Vec<(PlayerId, f64)> = active_indices(defense_roster, DepthChartUnit::Defense)
            .into_iter()
            .map(|i| {
                let skill = defense_roster.player(i).map(|p| p.skill().tackling() as f64).unwrap_or(50.0);
                (player_id(defense, i), skill)
            })
            .collect();

        let offensive_players = active_indices(offense_roster, DepthChartUnit::Offense)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defensive_players = active_indices(defense_roster, DepthChartUnit::Defense)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let inputs = run::RunInputs {
            carrier: player_id(offense, carrier_idx),
            carrier_rushing: carrier.skill().rushing() as f64,
            carrier_speed: carrier.physical().speed() as f64,
            carrier_awareness: carrier.physical().awareness() as f64,
            run_block_power,
            run_defense_power,
            defense_awareness,
            tacklers,
            down: self.game.down(),
            possession: offense,
            field_position: self.game.field_position(),
            offensive_players,
            defensive_players,
        };
        Ok(Play::Run(run::execute(rng, inputs)?))
    }

    fn execute_pass(&mut self, rng: &mut dyn RandomSource, offense: Possession, defense: Possession) -> Result<Play, EngineError> {
        let offense_roster = self.team(offense).roster();
        let defense_roster = self.team(defense).roster();

        let passer_idx = starter_index(offense_roster, DepthChartUnit::Offense, Position::Qb)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("pass"),
                role: String::from("passer"),
            })?;
        let passer = offense_roster.player(passer_idx).expect("starter index is valid");

        let eligible_receivers: Vec<usize> = [Position::Wr, Position::Te, Position::Rb]
            .iter()
            .flat_map(|&pos| active_indices_at(offense_roster, DepthChartUnit::Offense, pos))
            .collect();
        if eligible_receivers.is_empty() {
            return Err(EngineError::ContractViolation {
                play: String::from("pass"),
                role: String::from("receiver"),
            });
        }
        let receiver_idx = eligible_receivers
            [rng.integer("receiver_target_selection", 0, eligible_receivers.len() as i64)? as usize];
        let receiver = offense_roster.player(receiver_idx).expect("eligible index is valid");

        let offense_lineup = offense_roster.lineup(DepthChartUnit::Offense);
        let defense_lineup = defense_roster.lineup(DepthChartUnit::Defense);
        let pass_block_power = power::pass_blocking_power(&offense_lineup);
        let pass_rush_power = power::pass_rush_power(&defense_lineup);
        let coverage_power = power::coverage_power(&defense_lineup);
        let defense_awareness = power::lineup_awareness(&defense_lineup);

        let defenders: Vec<PlayerId> = active_indices(defense_roster, DepthChartUnit::Defense)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();
        let offensive_players = active_indices(offense_roster, DepthChartUnit::Offense)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defensive_players = defenders.clone();

        let inputs = pass::PassInputs {
            passer: player_id(offense, passer_idx),
            passer_awareness: passer.physical().awareness() as f64,
            receiver: player_id(offense, receiver_idx),
            receiver_speed: receiver.physical().speed() as f64,
            receiver_agility: receiver.physical().agility() as f64,
            receiver_rushing: receiver.skill().rushing() as f64,
            receiver_catching: receiver.skill().catching() as f64,
            pass_block_power,
            pass_rush_power,
            coverage_power,
            defense_awareness,
            rush_count: 4,
            defenders,
            down: self.game.down(),
            distance: self.game.yards_to_go(),
            possession: offense,
            field_position: self.game.field_position(),
            offensive_players,
            defensive_players,
        };
        Ok(Play::Pass(pass::execute(rng, inputs)?))
    }

    fn execute_fieldgoal(&mut self, rng: &mut dyn RandomSource, offense: Possession, defense: Possession) -> Result<Play, EngineError> {
        let offense_roster = self.team(offense).roster();
        let defense_roster = self.team(defense).roster();

        let kicker_idx = starter_index(offense_roster, DepthChartUnit::FieldGoal, Position::K)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("field_goal"),
                role: String::from("kicker"),
            })?;
        let kicker = offense_roster.player(kicker_idx).expect("starter index is valid");

        let block_lineup = offense_roster.lineup(DepthChartUnit::FieldGoal);
        let rush_lineup = defense_roster.lineup(DepthChartUnit::FieldGoalBlock);
        let block_power = power::pass_blocking_power(&block_lineup);
        let rush_power = power::pass_rush_power(&rush_lineup);

        let distance = self.game.yards_to_touchdown(offense) + 17;
        let offensive_players = active_indices(offense_roster, DepthChartUnit::FieldGoal)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defensive_players = active_indices(defense_roster, DepthChartUnit::FieldGoalBlock)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let inputs = fieldgoal::FieldGoalInputs {
            kicker: player_id(offense, kicker_idx),
            kicking: kicker.skill().kicking() as f64,
            distance,
            block_power,
            rush_power,
            possession: offense,
            field_position: offense_relative(self.game.field_position(), offense),
            offensive_players,
            defensive_players,
        };
        Ok(Play::FieldGoal(fieldgoal::execute(rng, inputs)?))
    }

    fn execute_punt(&mut self, rng: &mut dyn RandomSource, offense: Possession, defense: Possession) -> Result<Play, EngineError> {
        let offense_roster = self.team(offense).roster();
        let defense_roster = self.team(defense).roster();

        let punter_idx = starter_index(offense_roster, DepthChartUnit::PuntCoverage, Position::P)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("punt"),
                role: String::from("punter"),
            })?;
        let punter = offense_roster.player(punter_idx).expect("starter index is valid");
        let long_snapper_quality = starter_index(offense_roster, DepthChartUnit::PuntCoverage, Position::Ls)
            .and_then(|i| offense_roster.player(i))
            .map(|p| p.skill().blocking() as f64)
            .unwrap_or(50.0);

        let returner_idx = starter_index(defense_roster, DepthChartUnit::PuntReturn, Position::Rb)
            .or_else(|| starter_index(defense_roster, DepthChartUnit::PuntReturn, Position::Wr))
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("punt"),
                role: String::from("returner"),
            })?;
        let returner = defense_roster.player(returner_idx).expect("starter index is valid");

        let punt_block_lineup = offense_roster.lineup(DepthChartUnit::PuntCoverage);
        let punt_rush_lineup = defense_roster.lineup(DepthChartUnit::PuntReturn);
        let punt_block_power = power::pass_blocking_power(&punt_block_lineup);
        let punt_rush_power = power::pass_rush_power(&punt_rush_lineup);
        let coverage_power = power::coverage_power(&punt_block_lineup);

        let offensive_players = active_indices(offense_roster, DepthChartUnit::PuntCoverage)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defensive_players = active_indices(defense_roster, DepthChartUnit::PuntReturn)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let inputs = punt::PuntInputs {
            punter: player_id(offense, punter_idx),
            kicking: punter.skill().kicking() as f64,
            long_snapper_quality,
            returner: player_id(defense, returner_idx),
            returner_skill: returner.skill().rushing() as f64,
            punt_rush_power,
            punt_block_power,
            coverage_power,
            possession: offense,
            field_position: self.game.field_position(),
            offensive_players,
            defensive_players,
        };
        Ok(Play::Punt(punt::execute(rng, inputs)?))
    }

    fn execute_kneel(&mut self, offense: Possession) -> Result<Play, EngineError> {
        let roster = self.team(offense).roster();
        let qb_idx = starter_index(roster, DepthChartUnit::Offense, Position::Qb)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("kneel"),
                role: String::from("quarterback"),
            })?;
        let offensive_players = active_indices(roster, DepthChartUnit::Offense)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defense = offense.opponent();
        let defensive_players = active_indices(self.team(defense).roster(), DepthChartUnit::Defense)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let mut common = PlayCommon::new(self.game.field_position(), self.game.down(), offense, offensive_players, defensive_players);
        common.yards_gained = -1;
        common.end_field_position = match offense {
            Possession::Home => self.game.field_position().saturating_sub(1),
            _ => (self.game.field_position() + 1).min(100),
        };
        common.elapsed_seconds = 40;
        common.clock_stopped = false;

        Ok(Play::Run(RunPlay {
            common,
            carrier: player_id(offense, qb_idx),
            direction: RunDirection::Middle,
            tackle_break: false,
            breakaway: false,
        }))
    }

    fn execute_spike(&mut self, offense: Possession) -> Result<Play, EngineError> {
        let roster = self.team(offense).roster();
        let qb_idx = starter_index(roster, DepthChartUnit::Offense, Position::Qb)
            .ok_or_else(|| EngineError::ContractViolation {
                play: String::from("spike"),
                role: String::from("quarterback"),
            })?;
        let offensive_players = active_indices(roster, DepthChartUnit::Offense)
            .into_iter()
            .map(|i| player_id(offense, i))
            .collect();
        let defense = offense.opponent();
        let defensive_players = active_indices(self.team(defense).roster(), DepthChartUnit::Defense)
            .into_iter()
            .map(|i| player_id(defense, i))
            .collect();

        let mut common = PlayCommon::new(self.game.field_position(), self.game.down(), offense, offensive_players, defensive_players);
        common.elapsed_seconds = 1;
        common.clock_stopped = true;

        Ok(Play::Pass(PassPlay {
            common,
            passer: player_id(offense, qb_idx),
            segments: Vec::new(),
            sacked: false,
            interceptor: None,
        }))
    }

    /// Clone any penalties the executors already recorded, run each
    /// through the accept/decline decision engine, and enforce the
    /// result (spec §4.7). Plays with no recorded penalties short-circuit
    /// to a pass-through result.
    fn apply_post_play_penalties(&mut self, play: &Play) -> Result<EnforcementResult, EngineError> {
        let common = play.common();
        if common.penalties.is_empty() {
            return Ok(EnforcementResult {
                net_yards: common.yards_gained,
                automatic_first_down: false,
                loss_of_down: false,
                offsetting: false,
                replay_down: false,
                dead_ball: false,
            });
        }

        let offense = common.possession_at_snap;
        let outcome = PlayOutcomeSummary {
            yards_gained: common.yards_gained,
            turnover: common.possession_changed && !common.touchdown,
            turnover_on_downs: false,
            first_down_earned: common.yards_gained >= self.game.yards_to_go() as i32,
            touchdown_by_fouled_team: common.touchdown,
        };

        let mut decided: Vec<Penalty> = Vec::with_capacity(common.penalties.len());
        for p in &common.penalties {
            let mut p = p.clone();
            p.accepted = if p.kind.is_dead_ball() {
                true
            } else if p.team == offense {
                penalty_accept::decide_offensive_foul(&p, &outcome) == AcceptDecision::Accept
            } else {
                penalty_accept::decide_defensive_foul(&p, &outcome) == AcceptDecision::Accept
            };
            decided.push(p);
        }

        let relative_spot = offense_relative(common.start_field_position, offense);
        Ok(penalty::enforce(&decided, offense, common.yards_gained, relative_spot))
    }

    /// Advance down, distance, field position, and possession for a
    /// finished scrimmage play (spec §4.10 "PostPlay"). Returns whether
    /// possession changed hands, via either a turnover or a failed fourth
    /// down, so the overtime handler can treat both as the end of a
    /// possession.
    fn advance_down_and_possession(&mut self, play: &Play, enforcement: &EnforcementResult) -> Result<bool, EngineError> {
        let common = play.common();
        let offense = common.possession_at_snap;

        if enforcement.dead_ball || enforcement.offsetting {
            return Ok(false);
        }
        if common.touchdown || common.safety {
            return Ok(false);
        }

        if common.possession_changed {
            let defense = offense.opponent();
            self.game.set_possession(defense);
            self.game.set_field_position(common.end_field_position)?;
            self.game.set_down(Down::First);
            let yards_to_go = self.game.yards_to_touchdown(defense).min(10);
            self.game.set_yards_to_go(yards_to_go);
            return Ok(true);
        }

        let relative_start = offense_relative(common.start_field_position, offense);
        let relative_end = (relative_start as i32 + enforcement.net_yards).clamp(0, 100) as u32;
        let new_absolute = absolute_from_offense_relative(relative_end, offense);
        self.game.set_field_position(new_absolute)?;

        let gained_to_line = enforcement.net_yards >= self.game.yards_to_go() as i32;
        let earns_first_down = enforcement.automatic_first_down || (!enforcement.loss_of_down && gained_to_line);

        if earns_first_down {
            self.game.set_down(Down::First);
            let yards_to_go = self.game.yards_to_touchdown(offense).min(10);
            self.game.set_yards_to_go(yards_to_go);
            return Ok(false);
        }

        match self.game.down().next() {
            Some(next_down) => {
                self.game.set_down(next_down);
                let remaining = (self.game.yards_to_go() as i32 - enforcement.net_yards).max(1) as u32;
                self.game.set_yards_to_go(remaining);
                Ok(false)
            }
            None => {
                let defense = offense.opponent();
                self.game.set_possession(defense);
                self.game.set_down(Down::First);
                let yards_to_go = self.game.yards_to_touchdown(defense).min(10);
                self.game.set_yards_to_go(yards_to_go);
                Ok(true)
            }
        }
    }

    /// Apply a kickoff's or punt's own self-computed result directly —
    /// unlike scrimmage plays there is no down/distance to re-derive, and
    /// both executors already express `end_field_position` in absolute
    /// terms (0 = home goal, 100 = away goal).
    fn apply_kick_result(&mut self, play: &Play) -> Result<(), EngineError> {
        let common = play.common();
        let offense = common.possession_at_snap;
        let defense = offense.opponent();
        let new_possession = if common.possession_changed { defense } else { offense };
        self.game.set_possession(new_possession);
        self.game.set_field_position(common.end_field_position)?;
        self.game.set_down(Down::First);
        let yards_to_go = self.game.yards_to_touchdown(new_possession).min(10);
        self.game.set_yards_to_go(yards_to_go);
        self.kicking_team = new_possession.opponent();
        Ok(())
    }

    /// Apply a field goal attempt's result. Unlike the kickoff/punt
    /// executor, the field goal executor works entirely in the kicking
    /// offense's own relative frame (matching [`penalty::enforce`]'s
    /// convention, not the absolute scale `Game` stores) — this recomputes
    /// the new absolute spot directly rather than trusting
    /// `common.end_field_position`, whose meaning shifts across the
    /// executor's own miss/block branches.
    fn apply_fieldgoal_result(&mut self, offense: Possession, fg: &crate::game::play::FieldGoalPlay) -> Result<(), EngineError> {
        if fg.made {
            return Ok(());
        }
        let defense = offense.opponent();
        let new_absolute = if fg.blocked && fg.common.possession_changed {
            let relative = offense_relative(self.game.field_position(), offense);
            let relative_after = (relative as i32 - fg.common.yards_gained).clamp(0, 100) as u32;
            absolute_from_offense_relative(relative_after, offense)
        } else {
            // a clean miss, or a block nobody returned: the defense takes
            // over at the spot of the attempt.
            self.game.field_position()
        };
        self.game.set_possession(defense);
        self.game.set_field_position(new_absolute)?;
        self.game.set_down(Down::First);
        let yards_to_go = self.game.yards_to_touchdown(defense).min(10);
        self.game.set_yards_to_go(yards_to_go);
        self.kicking_team = defense.opponent();
        Ok(())
    }

    fn finish_play(&mut self, rng: &mut dyn RandomSource, play: Play) -> Result<Play, EngineError> {
        self.game.set_current_play(Some(play));
        self.game.finalize_current_play();
        let recorded = self.game.plays().last().cloned().expect("just finalized a play");
        self.stats.record_play(rng, &recorded)?;
        Ok(recorded)
    }
}

/// Set `common.touchdown`/`common.safety` — and, for turnovers, the
/// actual post-return field position — from a play's raw outcome. The
/// executors only produce yardage and segments; detecting that a play
/// crossed a goal line is the flow's job (spec §4.6 leaves touchdown/
/// safety detection to the caller, not the per-play mechanic).
fn annotate_scoring(play: &mut Play) {
    match play {
        Play::Run(_) | Play::Pass(_) => {
            let offense = play.common().possession_at_snap;
            if play.common().possession_changed {
                let return_yards = turnover_return_yards(play);
                let relative_start = offense_relative(play.common().start_field_position, offense);
                let relative_after = (relative_start as i32 - return_yards).clamp(0, 100) as u32;
                let absolute = absolute_from_offense_relative(relative_after, offense);
                let common = play.common_mut();
                common.end_field_position = absolute;
                if relative_after == 0 {
                    common.touchdown = true;
                }
                return;
            }
            let relative_end = offense_relative(play.common().end_field_position, offense);
            let common = play.common_mut();
            if relative_end >= 100 {
                common.touchdown = true;
            } else if relative_end == 0 && common.yards_gained < 0 {
                common.safety = true;
            }
        }
        Play::Kickoff(_) | Play::Punt(_) => {
            let offense = play.common().possession_at_snap;
            if play.common().possession_changed {
                let relative_end = offense_relative(play.common().end_field_position, offense);
                if relative_end == 0 {
                    play.common_mut().touchdown = true;
                }
            }
        }
        Play::FieldGoal(_) => {}
    }
}

/// Net return yardage for a scrimmage-play turnover, whether by
/// interception or a fumble recovered by the defense. Run plays carry no
/// segments of their own, so a recovered fumble there is read back out of
/// `common.fumbles` instead.
fn turnover_return_yards(play: &Play) -> i32 {
    if let Play::Pass(p) = play {
        for segment in &p.segments {
            if let PlaySegment::Return { yards, .. } = segment {
                return *yards;
            }
        }
    }
    play.common()
        .fumbles
        .iter()
        .rev()
        .find(|f| f.recovered_by.is_some() && f.recovery_team != play.common().possession_at_snap)
        .map(|f| f.return_yards)
        .unwrap_or(0)
}

/// Convert an absolute field position (0 = home goal, 100 = away goal,
/// per [`crate::game::Game::yards_to_touchdown`]) to the offense's own
/// frame (0 = offense's goal, 100 = opponent's), as [`penalty::enforce`]
/// expects. Self-inverse, so the same formula converts back.
fn offense_relative(field_position: u32, offense: Possession) -> u32 {
    match offense {
        Possession::Home => field_position,
        _ => 100 - field_position,
    }
}

fn absolute_from_offense_relative(relative: u32, offense: Possession) -> u32 {
    offense_relative(relative, offense)
}

fn player_id(team: Possession, index: usize) -> PlayerId {
    PlayerId { team, index }
}

fn active_indices(roster: &Roster, unit: DepthChartUnit) -> Vec<usize> {
    roster
        .depth_chart(unit)
        .all()
        .into_iter()
        .filter(|&idx| roster.player(idx).map(|p| p.is_active()).unwrap_or(false))
        .collect()
}

fn active_indices_at(roster: &Roster, unit: DepthChartUnit, position: Position) -> Vec<usize> {
    roster
        .depth_chart(unit)
        .at(position)
        .into_iter()
        .filter(|&idx| roster.player(idx).map(|p| p.is_active()).unwrap_or(false))
        .collect()
}

fn starter_index(roster: &Roster, unit: DepthChartUnit, position: Position) -> Option<usize> {
    roster
        .depth_chart(unit)
        .at(position)
        .into_iter()
        .find(|&idx| roster.player(idx).map(|p| p.is_active()).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Player;
    use crate::rng::SeededSource;
    use crate::team::coach::Coach;

    fn add(roster: &mut Roster, name: &str, position: Position) -> usize {
        roster.add_player(Player::new(name, position))
    }

    fn build_roster() -> Roster {
        let mut roster = Roster::new();
        let qb = add(&mut roster, "QB", Position::Qb);
        let rb = add(&mut roster, "RB", Position::Rb);
        let fb = add(&mut roster, "FB", Position::Fb);
        let wr1 = add(&mut roster, "WR1", Position::Wr);
        let wr2 = add(&mut roster, "WR2", Position::Wr);
        let te = add(&mut roster, "TE", Position::Te);
        let c = add(&mut roster, "C", Position::C);
        let g1 = add(&mut roster, "G1", Position::G);
        let g2 = add(&mut roster, "G2", Position::G);
        let t1 = add(&mut roster, "T1", Position::T);
        let t2 = add(&mut roster, "T2", Position::T);
        let dt1 = add(&mut roster, "DT1", Position::Dt);
        let dt2 = add(&mut roster, "DT2", Position::Dt);
        let de1 = add(&mut roster, "DE1", Position::De);
        let de2 = add(&mut roster, "DE2", Position::De);
        let lb1 = add(&mut roster, "LB1", Position::Lb);
        let lb2 = add(&mut roster, "LB2", Position::Lb);
        let olb = add(&mut roster, "OLB", Position::Olb);
        let cb1 = add(&mut roster, "CB1", Position::Cb);
        let cb2 = add(&mut roster, "CB2", Position::Cb);
        let s = add(&mut roster, "S", Position::S);
        let fs = add(&mut roster, "FS", Position::Fs);
        let k = add(&mut roster, "K", Position::K);
        let p = add(&mut roster, "P", Position::P);
        let ls = add(&mut roster, "LS", Position::Ls);

        {
            let chart = roster.depth_chart_mut(DepthChartUnit::Offense);
            chart.assign(Position::Qb, qb);
            chart.assign(Position::Rb, rb);
            chart.assign(Position::Fb, fb);
            chart.assign(Position::Wr, wr1);
            chart.assign(Position::Wr, wr2);
            chart.assign(Position::Te, te);
            chart.assign(Position::C, c);
            chart.assign(Position::G, g1);
            chart.assign(Position::G, g2);
            chart.assign(Position::T, t1);
            chart.assign(Position::T, t2);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::Defense);
            chart.assign(Position::Dt, dt1);
            chart.assign(Position::Dt, dt2);
            chart.assign(Position::De, de1);
            chart.assign(Position::De, de2);
            chart.assign(Position::Lb, lb1);
            chart.assign(Position::Lb, lb2);
            chart.assign(Position::Olb, olb);
            chart.assign(Position::Cb, cb1);
            chart.assign(Position::Cb, cb2);
            chart.assign(Position::S, s);
            chart.assign(Position::Fs, fs);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::KickoffCoverage);
            chart.assign(Position::K, k);
            chart.assign(Position::Lb, lb1);
            chart.assign(Position::Lb, lb2);
            chart.assign(Position::Wr, wr1);
            chart.assign(Position::Wr, wr2);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::KickoffReturn);
            chart.assign(Position::Rb, rb);
            chart.assign(Position::Wr, wr1);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::PuntCoverage);
            chart.assign(Position::P, p);
            chart.assign(Position::Ls, ls);
            chart.assign(Position::Lb, lb1);
            chart.assign(Position::Wr, wr2);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::PuntReturn);
            chart.assign(Position::Rb, rb);
            chart.assign(Position::Wr, wr1);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::FieldGoal);
            chart.assign(Position::K, k);
            chart.assign(Position::Ls, ls);
            chart.assign(Position::C, c);
            chart.assign(Position::G, g1);
            chart.assign(Position::G, g2);
            chart.assign(Position::T, t1);
            chart.assign(Position::T, t2);
        }
        {
            let chart = roster.depth_chart_mut(DepthChartUnit::FieldGoalBlock);
            chart.assign(Position::Dt, dt1);
            chart.assign(Position::Dt, dt2);
            chart.assign(Position::De, de1);
            chart.assign(Position::Lb, lb2);
        }

        roster
    }

    fn build_team(name: &str, short_name: &str) -> Team {
        Team::from_parts(name, short_name, Coach::new(), build_roster())
    }

    #[test]
    fn opening_kickoff_sets_a_receiving_offense() {
        let home = build_team("Home Rivets", "HOM");
        let away = build_team("Away Cyclones", "AWY");
        let mut flow = Flow::new(&home, &away, crate::config::Configuration::default());
        let mut rng = SeededSource::new(1);

        let mut state = GameFlowState::PreGame;
        for _ in 0..3 {
            state = flow.step(state, &mut rng).unwrap();
        }
        assert_eq!(state, GameFlowState::PrePlay);
        assert_ne!(flow.game().possession(), Possession::None);
        assert_eq!(flow.game().down(), Down::First);
        assert!(!flow.game().plays().is_empty());
    }

    #[test]
    fn a_full_game_reaches_post_game_without_error() {
        let home = build_team("Home Rivets", "HOM");
        let away = build_team("Away Cyclones", "AWY");
        let mut flow = Flow::new(&home, &away, crate::config::Configuration::default());
        let mut rng = SeededSource::new(7);

        flow.run(&mut rng).expect("a full simulated game should not error");

        assert!(!flow.game().plays().is_empty());
        assert!(flow.game().home_score() < 200);
        assert!(flow.game().away_score() < 200);
    }

    #[test]
    fn offense_relative_round_trips_through_absolute() {
        assert_eq!(offense_relative(30, Possession::Home), 30);
        assert_eq!(offense_relative(30, Possession::Away), 70);
        assert_eq!(absolute_from_offense_relative(offense_relative(42, Possession::Away), Possession::Away), 42);
    }
}

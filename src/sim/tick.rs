//! Per-frame simulation tick
//!
//! Advances the session by one caller-supplied delta. The caller clamps the
//! delta (see `Settings::clamp_dt`); nothing here reads the wall clock.

use super::collision::collides;
use super::effects::{Effects, SoundEffect};
use super::enemy::{BehaviorCtx, Enemy};
use super::entity::Entity;
use super::input::TickInput;
use super::palette;
use super::player::ZapMode;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Chance per Attract tick of a decorative line burst
const ATTRACT_SPARK_CHANCE: f32 = 0.05;
const ATTRACT_SPARK_PARTICLES: u32 = 5;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, fx: &mut Effects) {
    // Idle/demo mode - AI plays the game
    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    if state.phase != GamePhase::Paused {
        state.game_time += dt;
    }

    match state.phase {
        GamePhase::Attract => update_attract(state, &input, dt, fx),
        GamePhase::Playing => update_playing(state, &input, dt, fx),
        GamePhase::Dying => update_dying(state, dt, fx),
        GamePhase::LevelComplete => update_level_complete(state, dt, fx),
        GamePhase::Warping => update_warping(state, dt, fx),
        GamePhase::GameOver => update_game_over(state, &input, dt, fx),
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
        }
    }
}

/// Reset score and lives, load level 0 and start playing
pub fn start_game(state: &mut GameState, fx: &mut Effects) {
    state.score = 0;
    state.lives = state.settings.starting_lives;
    state.level_bonus = 0;
    state.player.invulnerable = false;
    state.player.invulnerability_time = 0.0;

    state.levels.load_level(0);
    reset_level(state, fx);
    state.phase = GamePhase::Playing;
    log::info!("Game started (seed {})", state.seed);
}

/// Clear per-level entities and hazards for the loaded level
fn reset_level(state: &mut GameState, fx: &mut Effects) {
    state.enemies.clear();
    state.projectiles.clear();
    fx.clear();

    state.player.body.alive = true;
    state.player.body.segment = 0;
    state.player.reset_for_level();

    let level = state.levels.current_mut();
    level.tube_mut().clear_spikes();
    level.tube_mut().clear_electrification();

    state.spawn_timer = 0.0;
    state.spawn_interval = state.levels.current().spawn_interval();
    state.current_wave = 0;
    state.enemies_spawned = 0;
    state.enemies_killed = 0;
    state.state_timer = 0.0;
    state.state_progress = 0.0;
}

fn update_attract(state: &mut GameState, input: &TickInput, dt: f32, fx: &mut Effects) {
    fx.advance(dt);

    if state.rng.chance(ATTRACT_SPARK_CHANCE) {
        let level = state.levels.current();
        let tube = level.tube();
        let segment = tube.segment(state.rng.index(tube.segment_count()));
        fx.line(
            segment.inner_left(),
            segment.outer_left(),
            level.color,
            ATTRACT_SPARK_PARTICLES,
        );
    }

    if input.start {
        start_game(state, fx);
    }
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32, fx: &mut Effects) {
    if input.pause {
        state.phase = GamePhase::Paused;
        return;
    }

    let direction = input.move_direction();
    if direction != 0 {
        state
            .player
            .move_along(direction, state.levels.current().tube(), dt);
    }

    if input.fire || input.fire_just_pressed {
        if let Some(shot) = state.player.fire() {
            state.projectiles.push(shot);
            fx.play(SoundEffect::Shoot);
        }
    }

    if input.super_zapper {
        if let Some(mode) = state.player.use_super_zapper() {
            state.super_zapper.activate();
            activate_super_zapper(state, mode, fx);
            fx.play(SoundEffect::SuperZapper);
        }
    }

    state.player.update(dt);
    state.super_zapper.update(dt);

    update_projectiles(state, dt);
    update_enemies(state, dt, fx);
    if state.phase != GamePhase::Playing {
        return;
    }
    check_player_hazards(state, fx);
    if state.phase != GamePhase::Playing {
        return;
    }

    spawn_enemies(state, dt);
    fx.advance(dt);

    let level = state.levels.current();
    if state.enemies_spawned >= level.total_enemies() && state.enemies.is_empty() {
        start_level_complete(state, fx);
    }
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    for i in (0..state.projectiles.len()).rev() {
        state.projectiles[i].update(dt);
        if !state.projectiles[i].is_alive() {
            state.projectiles.remove(i);
        }
    }
}

/// Advance every enemy and resolve its collisions with the player and shots
fn update_enemies(state: &mut GameState, dt: f32, fx: &mut Effects) {
    let player_segment = state.player.body.segment;
    let mut released: Vec<Enemy> = Vec::new();
    let mut player_hit = false;

    for i in (0..state.enemies.len()).rev() {
        {
            let mut ctx = BehaviorCtx {
                dt,
                tube: state.levels.current_mut().tube_mut(),
                player_segment,
                rng: &mut state.rng,
            };
            state.enemies[i].update_behavior(&mut ctx);
        }

        let enemy = &mut state.enemies[i];
        if enemy.is_alive() {
            if let Some(shot) = enemy.try_shoot() {
                state.projectiles.push(shot);
            }
        }

        if !state.player.invulnerable
            && enemy.is_alive()
            && enemy.is_at_top()
            && enemy.segment() == state.player.segment()
        {
            player_hit = true;
            break;
        }

        let tube = state.levels.current().tube();
        let hit = (0..state.projectiles.len()).rev().find(|&j| {
            let shot = &state.projectiles[j];
            shot.player_shot && collides(shot, &state.enemies[i], tube, PROJECTILE_HIT_THRESHOLD)
        });

        if let Some(j) = hit {
            state.projectiles.remove(j);
            let enemy = &mut state.enemies[i];
            fx.explosion(enemy.position(tube), enemy.color(), ENEMY_EXPLOSION_PARTICLES);
            fx.play(SoundEffect::EnemyDeath);

            let points = enemy.points;
            released.extend(enemy.on_destroyed(tube, &mut state.rng));
            state.enemies_killed += 1;
            state.award_points(points);
        }

        if !state.enemies[i].is_alive() {
            let enemy = state.enemies.remove(i);
            enemy.on_removed(state.levels.current_mut().tube_mut());
        }
    }

    for enemy in released {
        state.adopt_enemy(enemy);
    }
    if player_hit {
        player_death(state, fx);
    }
}

/// Spikes, electrified lanes and enemy shots kill an unshielded player
fn check_player_hazards(state: &mut GameState, fx: &mut Effects) {
    if state.player.invulnerable {
        return;
    }

    let tube = state.levels.current().tube();
    let lane = tube.segment(state.player.segment());
    if (lane.has_spike() && lane.spike_depth() > LETHAL_SPIKE_DEPTH) || lane.is_electrified() {
        player_death(state, fx);
        return;
    }

    let hit = (0..state.projectiles.len()).rev().find(|&j| {
        let shot = &state.projectiles[j];
        !shot.player_shot && collides(shot, &state.player, tube, DEFAULT_COLLISION_THRESHOLD)
    });
    if let Some(j) = hit {
        state.projectiles.remove(j);
        player_death(state, fx);
    }
}

fn spawn_enemies(state: &mut GameState, dt: f32) {
    let level = state.levels.current();
    let total = level.total_enemies();
    if state.enemies_spawned >= total {
        return;
    }

    state.spawn_timer += dt;
    if state.spawn_timer < state.spawn_interval {
        return;
    }
    state.spawn_timer = 0.0;

    let max_active = level.max_active();
    if state.enemies.len() >= max_active {
        return;
    }

    let capacity = MAX_WAVE_SIZE.min(max_active - state.enemies.len());
    let mut wave = level.create_enemy_wave(state.current_wave, capacity, &mut state.rng);
    if wave.is_empty() {
        let left = (total - state.enemies_spawned) as usize;
        log::warn!(
            "Wave {} drew nothing with {} enemies left; backfilling Flippers",
            state.current_wave,
            left
        );
        wave = level.backfill_wave(capacity.min(left), &mut state.rng);
    }

    let mut added = 0;
    for enemy in wave {
        if state.enemies_spawned < total {
            state.adopt_enemy(enemy);
            state.enemies_spawned += 1;
            added += 1;
        }
    }
    log::debug!(
        "Wave {}: spawned {} ({}/{})",
        state.current_wave,
        added,
        state.enemies_spawned,
        total
    );
    state.current_wave += 1;
}

fn activate_super_zapper(state: &mut GameState, mode: ZapMode, fx: &mut Effects) {
    let victims = match mode {
        ZapMode::All => std::mem::take(&mut state.enemies),
        ZapMode::Single if !state.enemies.is_empty() => {
            let i = state.rng.index(state.enemies.len());
            vec![state.enemies.remove(i)]
        }
        ZapMode::Single => Vec::new(),
    };
    log::info!(
        "Super Zapper ({:?}): {} destroyed, {} charges left",
        mode,
        victims.len(),
        state.player.super_zapper_charges
    );

    for mut enemy in victims {
        let position = enemy.position(state.levels.current().tube());
        fx.explosion(position, enemy.color(), ZAPPER_EXPLOSION_PARTICLES);
        enemy.body.alive = false;
        enemy.on_removed(state.levels.current_mut().tube_mut());
        state.enemies_killed += 1;
        state.award_points(enemy.points);
    }
}

fn player_death(state: &mut GameState, fx: &mut Effects) {
    let position = state.player.position(state.levels.current().tube());
    fx.explosion(position, palette::PLAYER, PLAYER_EXPLOSION_PARTICLES);
    fx.play(SoundEffect::PlayerDeath);

    state.player.body.alive = false;
    state.lives = state.lives.saturating_sub(1);
    state.state_timer = 0.0;
    state.state_progress = 0.0;

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: {} points on level {}",
            state.score,
            state.levels.current_number() + 1
        );
    } else {
        state.phase = GamePhase::Dying;
        log::debug!("Player destroyed, {} lives left", state.lives);
    }
}

fn start_level_complete(state: &mut GameState, fx: &mut Effects) {
    state.phase = GamePhase::LevelComplete;
    state.state_timer = 0.0;
    state.state_progress = 0.0;
    fx.play(SoundEffect::LevelComplete);

    state.level_bonus = state.compute_level_bonus();
    state.score += state.level_bonus;
    state.high_score = state.high_score.max(state.score);
    log::info!(
        "Level {} complete, bonus {}",
        state.levels.current_number() + 1,
        state.level_bonus
    );
}

/// Advance the phase timer; true once `duration` has elapsed
fn advance_timer(state: &mut GameState, dt: f32, duration: f32) -> bool {
    state.state_timer += dt;
    state.state_progress = (state.state_timer / duration).min(1.0);
    state.state_timer >= duration
}

fn update_level_complete(state: &mut GameState, dt: f32, fx: &mut Effects) {
    fx.advance(dt);
    if advance_timer(state, dt, LEVEL_COMPLETE_DELAY) {
        state.phase = GamePhase::Warping;
        state.state_timer = 0.0;
        state.state_progress = 0.0;
        fx.play(SoundEffect::Warp);

        let level = state.levels.current();
        fx.warp(level.tube().center(), level.tube().outer_radius(), level.color);
    }
}

fn update_warping(state: &mut GameState, dt: f32, fx: &mut Effects) {
    fx.advance(dt);
    if advance_timer(state, dt, WARP_DELAY) {
        state.levels.next_level();
        reset_level(state, fx);
        state.phase = GamePhase::Playing;
    }
}

fn update_dying(state: &mut GameState, dt: f32, fx: &mut Effects) {
    fx.advance(dt);
    if advance_timer(state, dt, DEATH_DELAY) {
        state.player.body.alive = true;
        state.player.body.segment = 0;
        state.player.make_invulnerable(RESPAWN_INVULNERABILITY);
        state.state_timer = 0.0;
        state.state_progress = 0.0;
        state.phase = GamePhase::Playing;
    }
}

fn update_game_over(state: &mut GameState, input: &TickInput, dt: f32, fx: &mut Effects) {
    fx.advance(dt);
    if input.start {
        start_game(state, fx);
    }
}

/// Demo player: start games, chase the most advanced enemy, keep firing
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = TickInput {
        idle_mode: true,
        pause: input.pause,
        ..Default::default()
    };

    match state.phase {
        GamePhase::Attract | GamePhase::GameOver => input.start = true,
        GamePhase::Playing => {
            let tube = state.tube();
            let player_segment = state.player.segment();

            let target = state
                .enemies
                .iter()
                .filter(|e| e.is_alive())
                .max_by(|a, b| {
                    a.depth()
                        .partial_cmp(&b.depth())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(enemy) = target {
                match tube.shortest_direction(player_segment, enemy.segment()) {
                    -1 => input.move_left = true,
                    1 => input.move_right = true,
                    _ => {}
                }
                // Panic button when something reaches the rim next to us
                let threatened = state.enemies.iter().any(|e| {
                    e.is_at_top()
                        && (e.segment() == player_segment
                            || tube.adjacent(player_segment, -1) == e.segment()
                            || tube.adjacent(player_segment, 1) == e.segment())
                });
                input.super_zapper = threatened && !state.player.invulnerable;
            }
            input.fire = true;
        }
        _ => {}
    }
    input
}

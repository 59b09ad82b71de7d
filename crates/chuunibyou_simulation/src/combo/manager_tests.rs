//! Тесты combo state machine.

#[cfg(test)]
mod tests {
    use crate::combo::ActionType::{HeavyAttack, LightAttack};
    use crate::combo::{
        ActionCue, ActionOutcome, ActionTree, ComboManager, ComboStatus, EmptyAction, NodeId,
        PauseAction, TickOutcome, TimedStrikeAction,
    };

    // Основной шаг: степень двойки. Decimal шаг проверяется отдельно
    const TICK: f32 = 0.125;
    const DECIMAL_TICK: f32 = 0.1;

    /// `[L]` (strike 0.25s, окно 0.5s) и `[L, L]` (те же тайминги)
    fn light_chain_manager() -> ComboManager {
        let mut tree = ActionTree::new();
        tree.register_combo(TimedStrikeAction::new("Light1", 0.25, 0.5), &[LightAttack])
            .unwrap();
        tree.register_combo(
            TimedStrikeAction::new("Light2", 0.25, 0.5),
            &[LightAttack, LightAttack],
        )
        .unwrap();
        ComboManager::new(tree)
    }

    fn tick_until_step_done(manager: &mut ComboManager) {
        for _ in 0..100 {
            if let TickOutcome::StepFinished { .. } = manager.tick(TICK) {
                return;
            }
        }
        panic!("step never finished");
    }

    fn assert_path_matches_buffer(manager: &ComboManager) {
        assert_eq!(
            manager.tree().path_to(manager.current()),
            manager.input_buffer().to_vec()
        );
    }

    #[test]
    fn test_new_manager_is_idle() {
        let mut manager = light_chain_manager();
        assert_eq!(manager.status(), ComboStatus::Idle);
        assert_eq!(manager.current(), NodeId::ROOT);
        assert!(manager.input_buffer().is_empty());
        assert_eq!(manager.tick(TICK), TickOutcome::Idle);
    }

    #[test]
    fn test_input_starts_step() {
        let mut manager = light_chain_manager();

        let outcome = manager.do_action(LightAttack);

        let light = manager.tree().resolve(&[LightAttack]).unwrap();
        assert_eq!(outcome, ActionOutcome::Advanced(light));
        assert_eq!(manager.status(), ComboStatus::RunningCombo);
        assert_eq!(manager.input_buffer(), &[LightAttack]);
        assert_path_matches_buffer(&manager);
    }

    #[test]
    fn test_busy_manager_drops_inputs() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        manager.tick(TICK); // 0.125 из 0.25

        let before = manager.snapshot();
        let current = manager.current();

        assert_eq!(manager.do_action(LightAttack), ActionOutcome::DroppedBusy);
        assert_eq!(manager.do_action(HeavyAttack), ActionOutcome::DroppedBusy);

        assert_eq!(manager.snapshot(), before);
        assert_eq!(manager.current(), current);
        assert!(manager.is_busy());
    }

    #[test]
    fn test_dead_end_from_idle_resets() {
        let mut tree = ActionTree::new();
        tree.register_combo(EmptyAction::default(), &[LightAttack]).unwrap();
        let mut manager = ComboManager::new(tree);

        assert_eq!(manager.do_action(HeavyAttack), ActionOutcome::Rejected);
        assert_eq!(manager.status(), ComboStatus::Idle);
        assert!(manager.input_buffer().is_empty());
        assert_eq!(manager.current(), NodeId::ROOT);

        // Повторный reject так же безвреден
        assert_eq!(manager.do_action(HeavyAttack), ActionOutcome::Rejected);
        assert_eq!(manager.status(), ComboStatus::Idle);
    }

    #[test]
    fn test_step_finishes_and_opens_window() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);

        assert_eq!(manager.tick(TICK), TickOutcome::Running);
        assert_eq!(manager.tick(TICK), TickOutcome::StepFinished { window: 0.5 });

        assert_eq!(manager.status(), ComboStatus::WaitingForNextComboInput);
        assert_eq!(manager.pending_window(), 0.5);
        assert_eq!(manager.input_buffer(), &[LightAttack]);
        assert!(manager.tree().node(manager.current()).is_done());
    }

    #[test]
    fn test_chain_within_window() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        tick_until_step_done(&mut manager);
        manager.tick(TICK); // окно ещё открыто (0.375 осталось)

        let outcome = manager.do_action(LightAttack);

        let light_light = manager.tree().resolve(&[LightAttack, LightAttack]).unwrap();
        assert_eq!(outcome, ActionOutcome::Advanced(light_light));
        assert_eq!(manager.current(), light_light);
        assert_eq!(manager.input_buffer(), &[LightAttack, LightAttack]);
        assert_eq!(manager.status(), ComboStatus::RunningCombo);
        assert_path_matches_buffer(&manager);
    }

    #[test]
    fn test_window_expiry_resets() {
        let mut tree = ActionTree::new();
        tree.register_combo(EmptyAction { input_window: 0.5 }, &[LightAttack])
            .unwrap();
        let mut manager = ComboManager::new(tree);

        manager.do_action(LightAttack);
        assert_eq!(manager.tick(TICK), TickOutcome::StepFinished { window: 0.5 });

        assert_eq!(manager.tick(TICK), TickOutcome::Waiting { remaining: 0.375 });
        assert_eq!(manager.tick(TICK), TickOutcome::Waiting { remaining: 0.25 });
        assert_eq!(manager.tick(TICK), TickOutcome::Waiting { remaining: 0.125 });
        assert_eq!(
            manager.status(),
            ComboStatus::WaitingForNextComboInput
        );

        assert_eq!(manager.tick(TICK), TickOutcome::WindowExpired);
        assert_eq!(manager.status(), ComboStatus::Idle);
        assert!(manager.input_buffer().is_empty());
        assert_eq!(manager.current(), NodeId::ROOT);
    }

    #[test]
    fn test_rejected_input_while_waiting_resets() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        tick_until_step_done(&mut manager);

        assert_eq!(manager.do_action(HeavyAttack), ActionOutcome::Rejected);
        assert_eq!(manager.status(), ComboStatus::Idle);
        assert!(manager.input_buffer().is_empty());
    }

    #[test]
    fn test_terminal_step_rejects_further_input() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        tick_until_step_done(&mut manager);
        manager.do_action(LightAttack);
        tick_until_step_done(&mut manager);

        // [L, L, L] не зарегистрирован
        assert_eq!(manager.do_action(LightAttack), ActionOutcome::Rejected);
        assert_eq!(manager.status(), ComboStatus::Idle);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        manager.tick(TICK);

        manager.reset();
        let once = manager.snapshot();
        let current = manager.current();

        manager.reset();
        assert_eq!(manager.snapshot(), once);
        assert_eq!(manager.current(), current);
        assert_eq!(manager.status(), ComboStatus::Idle);
        assert_eq!(manager.current(), NodeId::ROOT);
    }

    #[test]
    fn test_reentered_step_restarts_timer() {
        let mut manager = light_chain_manager();
        manager.do_action(LightAttack);
        tick_until_step_done(&mut manager);
        manager.reset();

        manager.do_action(LightAttack);
        let light = manager.current();
        assert!(!manager.tree().node(light).is_done());
        assert_eq!(manager.tick(TICK), TickOutcome::Running);
        assert_eq!(manager.tick(TICK), TickOutcome::StepFinished { window: 0.5 });
    }

    #[test]
    fn test_pause_step_timing() {
        let mut tree = ActionTree::new();
        tree.register_combo(PauseAction::new(0.5, 1.0), &[HeavyAttack])
            .unwrap();
        let mut manager = ComboManager::new(tree);

        manager.do_action(HeavyAttack);
        for _ in 0..3 {
            assert_eq!(manager.tick(TICK), TickOutcome::Running);
        }
        assert_eq!(manager.tick(TICK), TickOutcome::StepFinished { window: 1.0 });
    }

    #[test]
    fn test_cues_are_buffered_until_drained() {
        let mut tree = ActionTree::new();
        tree.register_combo(
            TimedStrikeAction::new("Light1", 0.125, 0.5).with_active_flag("Attacking"),
            &[LightAttack],
        )
        .unwrap();
        let mut manager = ComboManager::new(tree);

        manager.do_action(LightAttack);
        manager.tick(TICK);

        let cues = manager.drain_cues();
        assert_eq!(
            cues,
            vec![
                ActionCue::Bool {
                    name: "Attacking".to_string(),
                    value: true
                },
                ActionCue::Bool {
                    name: "Attacking".to_string(),
                    value: false
                },
            ]
        );
        assert!(manager.drain_cues().is_empty());
    }

    #[test]
    fn test_window_expires_on_exact_tick_with_decimal_delta() {
        let mut tree = ActionTree::new();
        tree.register_combo(EmptyAction { input_window: 0.5 }, &[LightAttack])
            .unwrap();
        let mut manager = ComboManager::new(tree);

        manager.do_action(LightAttack);
        assert_eq!(
            manager.tick(DECIMAL_TICK),
            TickOutcome::StepFinished { window: 0.5 }
        );

        // 0.5 - 0.1 × 5 в f32 оставляет ~1.5e-8, окно всё равно закрывается на 5-м тике
        for tick in 1..=4 {
            assert!(
                matches!(manager.tick(DECIMAL_TICK), TickOutcome::Waiting { .. }),
                "window closed early on tick {}",
                tick
            );
        }
        assert_eq!(manager.tick(DECIMAL_TICK), TickOutcome::WindowExpired);
        assert_eq!(manager.status(), ComboStatus::Idle);
    }

    #[test]
    fn test_step_timers_finish_on_exact_tick_with_decimal_delta() {
        let mut tree = ActionTree::new();
        tree.register_combo(TimedStrikeAction::new("Light1", 0.3, 0.5), &[LightAttack])
            .unwrap();
        tree.register_combo(PauseAction::new(0.3, 0.5), &[HeavyAttack])
            .unwrap();
        let mut manager = ComboManager::new(tree);

        for action in [LightAttack, HeavyAttack] {
            manager.reset();
            manager.do_action(action);
            assert_eq!(manager.tick(DECIMAL_TICK), TickOutcome::Running);
            assert_eq!(manager.tick(DECIMAL_TICK), TickOutcome::Running);
            assert_eq!(
                manager.tick(DECIMAL_TICK),
                TickOutcome::StepFinished { window: 0.5 },
                "{} step must finish on tick 3",
                action
            );
        }
    }
}

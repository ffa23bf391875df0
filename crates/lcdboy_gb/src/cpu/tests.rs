use super::*;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// CPU at the post-boot state with `program` placed at 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (cpu, bus)
}

#[test]
fn power_on_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert!(!cpu.ime);

    assert_eq!(Cpu::new_for_boot_rom().regs.pc, 0x0000);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00, 0x00]);
    let cycles = cpu.step_instruction(&mut bus);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.instructions(), 1);
    assert!(cpu.at_instruction_boundary());
}

#[test]
fn fetch_happens_only_after_wait_expires() {
    // LD BC,d16 (12 cycles) then NOP.
    let (mut cpu, mut bus) = setup(&[0x01, 0x34, 0x12, 0x00]);
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.pc, 0x0103);

    for _ in 0..11 {
        assert!(!cpu.step(&mut bus));
    }
    assert_eq!(cpu.regs.pc, 0x0103);
    assert!(cpu.step(&mut bus));
    assert_eq!(cpu.regs.pc, 0x0104);
    assert_eq!(cpu.cycles(), 13);
}

#[test]
fn add_then_sub_round_trip_law() {
    let mut cpu = Cpu::new();
    for a in 0..=255u8 {
        for n in 0..=255u8 {
            cpu.regs.set_a(a);
            cpu.regs.set_flags(Flags::empty());
            cpu.alu_add(n, false);
            let add_flags = cpu.regs.flags() & (Flags::H | Flags::C);
            assert_eq!(cpu.regs.a(), a.wrapping_add(n));

            cpu.alu_sub(n, false);
            assert_eq!(cpu.regs.a(), a, "a={a:#04X} n={n:#04X}");
            assert_eq!(
                cpu.regs.flags() & (Flags::H | Flags::C),
                add_flags,
                "a={a:#04X} n={n:#04X}"
            );
            assert!(cpu.get_flag(Flags::N));
        }
    }
}

#[test]
fn inc_dec_never_touch_carry() {
    let mut cpu = Cpu::new();
    for value in 0..=255u8 {
        for carry in [false, true] {
            cpu.set_flag(Flags::C, carry);
            let up = cpu.alu_inc8(value);
            assert_eq!(cpu.get_flag(Flags::C), carry);
            let down = cpu.alu_dec8(up);
            assert_eq!(down, value);
            assert_eq!(cpu.get_flag(Flags::C), carry);
        }
    }
}

#[test]
fn inc_dec_flag_edges() {
    let mut cpu = Cpu::new();
    cpu.regs.set_flags(Flags::empty());

    assert_eq!(cpu.alu_inc8(0xFF), 0x00);
    assert!(cpu.get_flag(Flags::Z));
    assert!(cpu.get_flag(Flags::H));
    assert!(!cpu.get_flag(Flags::N));

    assert_eq!(cpu.alu_dec8(0x10), 0x0F);
    assert!(cpu.get_flag(Flags::H));
    assert!(cpu.get_flag(Flags::N));
    assert!(!cpu.get_flag(Flags::Z));
}

#[test]
fn rotate_left_then_right_restores_value_and_carry() {
    let mut cpu = Cpu::new();
    for value in 0..=255u8 {
        for carry in [false, true] {
            cpu.set_flag(Flags::C, carry);
            let rotated = cpu.alu_rl(value);
            let back = cpu.alu_rr(rotated);
            assert_eq!(back, value);
            assert_eq!(cpu.get_flag(Flags::C), carry);

            cpu.set_flag(Flags::C, carry);
            let rotated = cpu.alu_rlc(value);
            assert_eq!(cpu.alu_rrc(rotated), value);
            assert!(!cpu.get_flag(Flags::H));
            assert!(!cpu.get_flag(Flags::N));
        }
    }
}

#[test]
fn logic_ops_flags() {
    let mut cpu = Cpu::new();
    cpu.regs.set_a(0xF0);
    cpu.alu_and(0x0F);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(cpu.regs.flags(), Flags::Z | Flags::H);

    cpu.regs.set_a(0xF0);
    cpu.alu_or(0x0F);
    assert_eq!(cpu.regs.a(), 0xFF);
    assert_eq!(cpu.regs.flags(), Flags::empty());

    cpu.alu_xor(0xFF);
    assert_eq!(cpu.regs.flags(), Flags::Z);
}

#[test]
fn sbc_and_adc_use_carry() {
    let mut cpu = Cpu::new();
    cpu.regs.set_a(0x10);
    cpu.set_flag(Flags::C, true);
    cpu.alu_add(0x0F, true);
    assert_eq!(cpu.regs.a(), 0x20);
    assert!(cpu.get_flag(Flags::H));
    assert!(!cpu.get_flag(Flags::C));

    cpu.regs.set_a(0x00);
    cpu.set_flag(Flags::C, true);
    cpu.alu_sub(0x00, true);
    assert_eq!(cpu.regs.a(), 0xFF);
    assert!(cpu.get_flag(Flags::C));
    assert!(cpu.get_flag(Flags::H));
}

#[test]
fn daa_after_bcd_add_and_sub() {
    let mut cpu = Cpu::new();
    cpu.regs.set_a(0x15);
    cpu.alu_add(0x27, false);
    assert_eq!(cpu.regs.a(), 0x3C);
    cpu.alu_daa();
    assert_eq!(cpu.regs.a(), 0x42);
    assert!(!cpu.get_flag(Flags::C));
    assert!(!cpu.get_flag(Flags::H));

    cpu.alu_sub(0x15, false);
    cpu.alu_daa();
    assert_eq!(cpu.regs.a(), 0x27);
    assert!(!cpu.get_flag(Flags::C));
    assert!(cpu.get_flag(Flags::N));

    cpu.regs.set_a(0x99);
    cpu.alu_add(0x01, false);
    cpu.alu_daa();
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flags::Z));
    assert!(cpu.get_flag(Flags::C));
}

#[test]
fn add16_and_signed_offsets() {
    let mut cpu = Cpu::new();
    cpu.regs.set_flags(Flags::Z);
    cpu.regs.set_hl(0x0FFF);
    cpu.alu_add16_hl(0x0001);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.get_flag(Flags::H));
    assert!(!cpu.get_flag(Flags::C));
    // Z untouched.
    assert!(cpu.get_flag(Flags::Z));

    let result = cpu.alu_add16_signed(0xFFF8, 8);
    assert_eq!(result, 0x0000);
    assert!(cpu.get_flag(Flags::H));
    assert!(cpu.get_flag(Flags::C));
    assert!(!cpu.get_flag(Flags::Z));

    let result = cpu.alu_add16_signed(0x1000, -1);
    assert_eq!(result, 0x0FFF);
    assert!(!cpu.get_flag(Flags::H));
    assert!(!cpu.get_flag(Flags::C));
}

#[test]
fn rotate_accumulator_forces_zero_clear() {
    // RLCA with A=0, then RLA with A=0x80 and carry clear.
    let (mut cpu, mut bus) = setup(&[0x07, 0x17]);
    cpu.regs.set_a(0x00);
    cpu.regs.set_flags(Flags::empty());
    cpu.step_instruction(&mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(!cpu.get_flag(Flags::Z));

    cpu.regs.set_a(0x80);
    cpu.step_instruction(&mut bus);
    assert_eq!(cpu.regs.a(), 0x00);
    assert!(cpu.get_flag(Flags::C));
    assert!(!cpu.get_flag(Flags::Z));
}

#[test]
fn ld_indirect_forms_update_hl() {
    // LD (HL+),A ; LD (HL-),A ; LD A,(BC)
    let (mut cpu, mut bus) = setup(&[0x22, 0x32, 0x0A]);
    cpu.regs.set_a(0x5A);
    cpu.regs.set_hl(0xC000);
    cpu.regs.set_bc(0xC001);

    cpu.step_instruction(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x5A);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.regs.set_a(0x77);
    cpu.step_instruction(&mut bus);
    assert_eq!(bus.memory[0xC001], 0x77);
    assert_eq!(cpu.regs.hl(), 0xC000);

    cpu.regs.set_a(0x00);
    assert_eq!(cpu.step_instruction(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x77);
}

#[test]
fn ld_addr_sp_stores_little_endian() {
    let (mut cpu, mut bus) = setup(&[0x08, 0x00, 0xC0]);
    cpu.regs.sp = 0xBEEF;
    assert_eq!(cpu.step_instruction(&mut bus), 20);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn ldh_uses_high_page() {
    // LDH (0x80),A ; LD C,0x81 ; LD (C),A ; LDH A,(0x80)
    let (mut cpu, mut bus) = setup(&[0xE0, 0x80, 0x0E, 0x81, 0xE2, 0xF0, 0x80]);
    cpu.regs.set_a(0x42);
    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x42);
    cpu.step_instruction(&mut bus);
    cpu.step_instruction(&mut bus);
    assert_eq!(bus.memory[0xFF81], 0x42);
    bus.memory[0xFF80] = 0x99;
    cpu.step_instruction(&mut bus);
    assert_eq!(cpu.regs.a(), 0x99);
}

#[test]
fn call_and_ret_roundtrip() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]);
    bus.memory[0x0200] = 0xC9;

    let c1 = cpu.step_instruction(&mut bus);
    assert_eq!(c1, 24);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Return address 0x0103 sits low byte first at the new SP.
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x01);

    let c2 = cpu.step_instruction(&mut bus);
    assert_eq!(c2, 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_branches_cost_more_when_taken() {
    // JR NZ,+2 ; NOP ; NOP ; JR NZ,-4
    let (mut cpu, mut bus) = setup(&[0x20, 0x02, 0x00, 0x00, 0x20, 0xFC]);

    cpu.regs.set_flags(Flags::Z);
    assert_eq!(cpu.step_instruction(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.regs.pc = 0x0100;
    cpu.regs.set_flags(Flags::empty());
    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0104);

    // Backward jump relative to the following instruction (0x0106).
    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn conditional_jp_call_ret_costs() {
    // JP C,0x0110 ; CALL NC,0x0120 ; at 0x0120: RET Z ; RET NZ
    let (mut cpu, mut bus) = setup(&[0xDA, 0x10, 0x01, 0xD4, 0x20, 0x01]);
    bus.memory[0x0120] = 0xC8;
    bus.memory[0x0121] = 0xC0;
    cpu.regs.set_flags(Flags::empty());

    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.step_instruction(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0120);
    assert_eq!(cpu.step_instruction(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0121);
    assert_eq!(cpu.step_instruction(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0106);
}

#[test]
fn rst_pushes_return_address() {
    let (mut cpu, mut bus) = setup(&[0xEF]);
    assert_eq!(cpu.step_instruction(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x01);
    assert_eq!(bus.memory[0xFFFD], 0x01);
}

#[test]
fn pop_af_masks_low_nibble() {
    // PUSH BC ; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xF1]);
    cpu.regs.set_bc(0x12FF);
    assert_eq!(cpu.step_instruction(&mut bus), 16);
    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert_eq!(cpu.regs.af(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn cb_prefix_decodes_through_extended_table() {
    // SWAP A ; BIT 7,(HL) ; SET 0,(HL) ; RES 7,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37, 0xCB, 0x7E, 0xCB, 0xC6, 0xCB, 0xBE]);
    cpu.regs.set_a(0xF0);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;

    assert_eq!(cpu.step_instruction(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x0F);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.set_flag(Flags::C, true);
    assert_eq!(cpu.step_instruction(&mut bus), 12);
    assert!(!cpu.get_flag(Flags::Z));
    assert!(cpu.get_flag(Flags::H));
    assert!(cpu.get_flag(Flags::C));

    assert_eq!(cpu.step_instruction(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
    assert_eq!(cpu.step_instruction(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);
    assert_eq!(cpu.regs.pc, 0x0108);
    assert_eq!(cpu.instructions(), 4);
}

#[test]
fn interrupt_dispatch_in_one_step() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = Interrupt::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = (Interrupt::VBLANK | Interrupt::TIMER).bits();

    cpu.step(&mut bus);

    assert!(!cpu.ime);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::TIMER.bits());
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x00);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.wait_cycles(), DISPATCH_CYCLES - 1);
}

#[test]
fn interrupt_priority_picks_lowest_bit() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = (Interrupt::SERIAL | Interrupt::TIMER).bits();

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::SERIAL.bits());
}

#[test]
fn halt_wakes_without_ime_and_does_not_dispatch() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    assert_eq!(cpu.step_instruction(&mut bus), 4);
    assert!(cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0101);

    for _ in 0..100 {
        cpu.step(&mut bus);
    }
    assert!(cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0101);

    bus.memory[IE_ADDR as usize] = Interrupt::TIMER.bits();
    bus.memory[IF_ADDR as usize] = Interrupt::TIMER.bits();
    let executed = cpu.instructions();
    cpu.step(&mut bus);
    assert!(!cpu.halted);

    // Whether the NOP runs on the waking cycle depends on where the idle
    // wait was; either way the next instruction is the NOP at 0x0101.
    while cpu.instructions() == executed {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::TIMER.bits());
}

#[test]
fn ei_takes_effect_after_next_instruction() {
    // EI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = Interrupt::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = Interrupt::VBLANK.bits();

    cpu.step_instruction(&mut bus);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0101);

    // The NOP after EI still runs; the interrupt is taken right after it.
    cpu.step_instruction(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xFFFC], 0x02);
    assert_eq!(bus.memory[0xFFFD], 0x01);
}

#[test]
fn di_cancels_pending_ei() {
    // EI ; DI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    for _ in 0..4 {
        cpu.step_instruction(&mut bus);
    }
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0104);
}

#[test]
fn reti_enables_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;
    assert_eq!(cpu.step_instruction(&mut bus), 16);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn stop_is_two_bytes_and_resets_divider() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);
    bus.memory[0xFF04] = 0x55;
    cpu.step_instruction(&mut bus);
    assert!(cpu.stopped);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(bus.memory[0xFF04], 0x00);

    bus.memory[IE_ADDR as usize] = Interrupt::JOYPAD.bits();
    bus.memory[IF_ADDR as usize] = Interrupt::JOYPAD.bits();
    cpu.step(&mut bus);
    assert!(!cpu.stopped);
}

#[test]
fn unused_opcode_faults_and_halts() {
    let (mut cpu, mut bus) = setup(&[0xD3, 0x00]);
    assert!(!cpu.step(&mut bus));

    assert_eq!(
        cpu.fault(),
        Some(DecodeFault {
            opcode: 0xD3,
            address: 0x0100
        })
    );
    assert!(cpu.halted);

    // Further steps only burn cycles; interrupts do not revive the CPU.
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    for _ in 0..50 {
        assert!(!cpu.step(&mut bus));
    }
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.cycles(), 51);
    assert_eq!(cpu.instructions(), 0);
}

#[test]
fn every_defined_opcode_executes_without_fault() {
    for opcode in 0..=255u8 {
        let desc = table::primary(opcode);
        if desc.op.is_none() {
            continue;
        }
        let (mut cpu, mut bus) = setup(&[opcode, 0x00, 0x00]);
        cpu.step_instruction(&mut bus);
        assert!(cpu.fault().is_none(), "opcode {opcode:#04X}");
        assert!(cpu.instructions() >= 1, "opcode {opcode:#04X}");
    }
}

#![no_std]
#![no_main]

mod ambient_light;
mod board;
mod config;
mod controller;
mod errors;
mod events;
mod logging;
mod outputs;
mod override_switch;
mod sampler;
mod states;

use panic_halt as _;

/// Busy-wait between two ticks. At the 16 MHz reset clock this is about
/// 3 ms, so the default sample period of 5000 ticks is roughly 15 s.
const TICK_DELAY_CYCLES: u32 = 48_000;

#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true)]
mod app {
    use rtt_target::{rprintln, rtt_init, UpChannel};
    use stm32f4xx_hal::{
        adc::{
            config::{AdcConfig, Resolution},
            Adc,
        },
        gpio::{gpiob, Input, Output, PushPull},
        prelude::*,
    };

    use crate::{
        board::{AdcFrontEnd, AnalogInputs},
        config::Config,
        controller::{ControllerContext, LightController},
        logging::RttWriter,
        outputs::{ActiveLevel, Line, Outputs},
        override_switch::OverrideSwitch,
        TICK_DELAY_CYCLES,
    };

    type Controller = LightController<
        AdcFrontEnd,
        gpiob::PB8<Output<PushPull>>,
        gpiob::PB7<Output<PushPull>>,
        gpiob::PB9<Output<PushPull>>,
        gpiob::PB13<Input>,
    >;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        controller: Controller,
        context: ControllerContext,
        log: UpChannel,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let channels = rtt_init! {
            up: {
                0: { size: 512 name: "Terminal" }
                1: { size: 1024 name: "Controller" }
            }
        };
        rtt_target::set_print_channel(channels.up.0);

        rprintln!("Initializing");

        let config = Config::default();

        // GPIO setup
        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();

        // Indicators are active-high, the relay driver pulls in on low.
        // Start with the relay released.
        let day = gpiob.pb8.into_push_pull_output();
        let night = gpiob.pb7.into_push_pull_output();
        let mut relay = gpiob.pb9.into_push_pull_output();
        relay.set_high();
        let outputs = Outputs::new(
            Line::new(day, ActiveLevel::High),
            Line::new(night, ActiveLevel::High),
            Line::new(relay, ActiveLevel::Low),
        );

        // The override switch shorts to ground against the internal pull-up
        let switch = OverrideSwitch::new(gpiob.pb13.into_pull_up_input(), ActiveLevel::Low);

        rprintln!("GPIO setup done");

        // ADC setup
        let adc_config = AdcConfig::default().resolution(Resolution::Ten);
        let adc = Adc::adc1(ctx.device.ADC1, true, adc_config);
        let inputs = AnalogInputs {
            an0: gpioa.pa0.into_analog(),
            an1: gpioa.pa1.into_analog(),
            an2: gpioa.pa2.into_analog(),
            an3: gpioa.pa3.into_analog(),
            an4: gpioa.pa4.into_analog(),
        };
        let front_end = AdcFrontEnd::new(adc, inputs);

        rprintln!("ADC setup done");

        let controller = match LightController::new(config, front_end, outputs, switch) {
            Ok(controller) => controller,
            Err(e) => {
                rprintln!(
                    "Invalid configuration: {}",
                    core::str::from_utf8(e.to_bytes()).unwrap_or("?")
                );
                panic!("invalid configuration");
            }
        };

        let config = controller.config();
        rprintln!(
            "Sampling AN{} every {} ticks, debounce {}/{}",
            config.light_sensor_channel,
            config.sample_tick_threshold,
            config.debounce_trigger,
            config.debounce_max
        );

        rprintln!("Done initializing");

        (
            Shared {},
            Local {
                controller,
                context: ControllerContext::initialize(),
                log: channels.up.1,
            },
            init::Monotonics(),
        )
    }

    #[idle(local = [controller, context, log])]
    fn idle(ctx: idle::Context) -> ! {
        let controller = ctx.local.controller;
        let context = ctx.local.context;
        let mut log = RttWriter(ctx.local.log);

        loop {
            controller.tick(context);

            while let Some(event) = controller.pop_event() {
                ufmt::uwriteln!(log, "{}", event).ok();
            }
            while let Some(error) = controller.pop_error() {
                log.write_line(error.to_bytes());
            }

            cortex_m::asm::delay(TICK_DELAY_CYCLES);
        }
    }
}

pub mod scenario_sampler;
